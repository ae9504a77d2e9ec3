use tern_value::{conversion_unsupported, EvalResult, TypeTag, Value};

/// Converts values of one runtime type into another.
///
/// Converters are directional and type-pair specific: a converter that
/// turns host numbers into ints says nothing about ints into host values.
pub trait Converter: Send + Sync {
    /// Strategy name, for tracing.
    fn name(&self) -> &'static str;

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool;

    /// Convert `value` to `to`. Only called after `can_convert` accepted the
    /// pair; may still fail with a conversion error for bad data.
    fn convert(&self, value: Value, to: TypeTag) -> EvalResult;
}

/// Ordered converter chain; first converter accepting the pair wins.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, converter: impl Converter + 'static) {
        tracing::debug!(converter = converter.name(), "registered converter");
        self.converters.push(Box::new(converter));
    }

    pub fn find(&self, from: TypeTag, to: TypeTag) -> Option<&dyn Converter> {
        self.converters
            .iter()
            .find(|converter| converter.can_convert(from, to))
            .map(|strategy| &**strategy)
    }

    pub fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        from == to || self.find(from, to).is_some()
    }

    /// Convert `value` to `to`.
    ///
    /// A value that already has the target type is returned untouched.
    #[tracing::instrument(level = "trace", skip(self, value), fields(from = %value.type_tag()))]
    pub fn convert(&self, value: Value, to: TypeTag) -> EvalResult {
        let from = value.type_tag();
        if from == to {
            return Ok(value);
        }
        match self.find(from, to) {
            Some(converter) => {
                tracing::trace!(converter = converter.name(), "dispatch");
                converter.convert(value, to)
            }
            None => Err(conversion_unsupported(from.name(), to.name())),
        }
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}
