use serde_json::{Map, Value};

/// Per-item parameter access provided by the host.
pub trait ExecutionContext: Send + Sync {
    fn item_count(&self) -> usize;
    fn node_parameter(&self, name: &str, item_index: usize) -> Option<Value>;
}

/// Items held in memory, each a JSON object of parameter name to value.
/// Parameters missing from an item fall back to `defaults`.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    defaults: Map<String, Value>,
    items: Vec<Map<String, Value>>,
}

impl StaticContext {
    pub fn new(items: Vec<Map<String, Value>>) -> Self {
        Self {
            defaults: Map::new(),
            items,
        }
    }

    pub fn single(params: Map<String, Value>) -> Self {
        Self::new(vec![params])
    }

    /// Accepts a JSON array of objects (or a single object) as read from an
    /// items file.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let items = match value {
            Value::Array(arr) => arr,
            obj @ Value::Object(_) => vec![obj],
            other => return Err(format!("items must be an array of objects, got {}", other)),
        };
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                _ => Err(format!("item #{} is not an object", i)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }
}

impl ExecutionContext for StaticContext {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn node_parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.items
            .get(item_index)
            .and_then(|item| item.get(name))
            .or_else(|| self.defaults.get(name))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_single_object() {
        let ctx = StaticContext::from_value(json!({"task": "x"})).unwrap();
        assert_eq!(ctx.item_count(), 1);
        assert_eq!(ctx.node_parameter("task", 0), Some(json!("x")));
    }

    #[test]
    fn test_from_value_rejects_scalars() {
        assert!(StaticContext::from_value(json!(3)).is_err());
        assert!(StaticContext::from_value(json!([{"a": 1}, 2])).is_err());
    }

    #[test]
    fn test_defaults_fill_missing_parameters() {
        let mut defaults = Map::new();
        defaults.insert("timeout".into(), json!(60));
        let ctx = StaticContext::from_value(json!([{"timeout": 5}, {}]))
            .unwrap()
            .with_defaults(defaults);
        assert_eq!(ctx.node_parameter("timeout", 0), Some(json!(5)));
        assert_eq!(ctx.node_parameter("timeout", 1), Some(json!(60)));
        assert_eq!(ctx.node_parameter("timeout", 2), Some(json!(60)));
    }
}
