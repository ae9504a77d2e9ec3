use tern_value::{access_unsupported, EvalResult, Value};

/// Resolves `value.name` for the values it accepts.
pub trait Accessor: Send + Sync {
    /// Strategy name, for tracing.
    fn name(&self) -> &'static str;

    fn can_access(&self, value: &Value) -> bool;

    /// Read member `name`. Fails with an access error when the member is
    /// missing; only called after `can_access` accepted `value`.
    fn access(&self, value: &Value, name: &str) -> EvalResult;
}

/// Ordered accessor chain; first applicable accessor wins.
#[derive(Default)]
pub struct AccessorRegistry {
    accessors: Vec<Box<dyn Accessor>>,
}

impl AccessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, accessor: impl Accessor + 'static) {
        tracing::debug!(accessor = accessor.name(), "registered accessor");
        self.accessors.push(Box::new(accessor));
    }

    /// The accessor that would handle `value`, if any.
    pub fn find(&self, value: &Value) -> Option<&dyn Accessor> {
        self.accessors
            .iter()
            .find(|accessor| accessor.can_access(value))
            .map(|strategy| &**strategy)
    }

    #[tracing::instrument(level = "trace", skip(self, value), fields(ty = value.type_name()))]
    pub fn access(&self, value: &Value, name: &str) -> EvalResult {
        match self.find(value) {
            Some(accessor) => {
                tracing::trace!(accessor = accessor.name(), "dispatch");
                accessor.access(value, name)
            }
            None => Err(access_unsupported(value.type_name())),
        }
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}
