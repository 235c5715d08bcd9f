use serde_json::{Map, Value, json};

/// JSON configuration tree shared by the builder, the layout engine and the CLI.
///
/// Lookups use dotted paths (`"layout.bands.categoryInner"`). Values that are missing or have the
/// wrong JSON type read as `None`, so callers fall back to [`TaxoburstConfig::defaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaxoburstConfig(Value);

impl Default for TaxoburstConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl TaxoburstConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Full default configuration. Every key read anywhere in the workspace is listed here.
    pub fn defaults() -> Self {
        Self(json!({
            "weighting": "equal-split",
            "palette": [
                "#e6194b", "#3cb44b", "#4363d8", "#f58231",
                "#911eb4", "#42d4f4", "#f032e6", "#9a6324",
                "#469990", "#808000"
            ],
            "layout": {
                "margin": 40.0,
                "zoomOnSelect": true,
                "zoomSpan": 0.8,
                "bands": {
                    "categoryInner": 0.12,
                    "categoryOuter": 0.70,
                    "categoryOuterCompressed": 0.45,
                    "subcategoryOuter": 0.90,
                    "subcategoryOuterCompressed": 0.75,
                    "itemArcFraction": 0.30
                }
            },
            "label": {
                "wrapThreshold": 20,
                "truncateAt": 30,
                "truncateKeep": 27,
                "categoryOffset": 0.05,
                "categoryOffsetZoomed": 0.15,
                "categoryFontMin": 0.028,
                "categoryFontMax": 0.055,
                "subcategoryFontSize": 0.03,
                "subcategoryPadding": 6.0,
                "maxLines": 3,
                "charWidthFactor": 0.6
            }
        }))
    }

    /// Defaults with `overrides` deep-merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut config = Self::defaults();
        config.deep_merge(overrides);
        config
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.lookup(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let v = self.lookup(dotted_path)?;
        v.as_f64()
            .or_else(|| v.as_i64().map(|n| n as f64))
            .or_else(|| v.as_u64().map(|n| n as f64))
    }

    pub fn get_usize(&self, dotted_path: &str) -> Option<usize> {
        let v = self.get_f64(dotted_path)?;
        (v.is_finite() && v >= 0.0).then(|| v.round() as usize)
    }

    pub fn get_str_list(&self, dotted_path: &str) -> Option<Vec<String>> {
        let arr = self.lookup(dotted_path)?.as_array()?;
        Some(
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
        )
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Configs are objects; anything else built via `from_value` is replaced so this never
        // panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
