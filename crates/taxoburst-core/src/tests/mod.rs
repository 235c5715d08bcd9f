mod builder;
mod csv;
mod model;

pub(crate) const SAMPLE_CSV: &str = "\
AI Risk Taxonomy export,,,,,,,,,
ID,L1,L2,L3,Example,EU AI Act,NIST AI RMF,ISO/IEC 42001,OWASP LLM Top 10,MITRE ATLAS
1,Misuse,Cyber,Malware generation,Writes ransomware on request,✓,,✓,,✓
2,Misuse,Cyber,Phishing,,✓,✓,,,
3,Misuse,\"Bio, chem\",Pathogen uplift,\"Explains synthesis, step by step\",✓,✓,✓,✓,
4,Reliability,Hallucination,Fabricated citations,Invents a court case,,✓,,✓,
5,,Orphan,Row without category,ignored,✓,,,,
";
