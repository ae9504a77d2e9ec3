use tern_value::{not_iterable, EvalError, EvalResult, Value};

/// Single-pass cursor over the elements of an iterable value.
///
/// A fresh cursor is positioned before the first element:
///
/// ```text
/// while cursor.more() {
///     cursor.next();
///     let item = cursor.current()?;
/// }
/// ```
///
/// Cursors are finite and cannot be restarted. They hold their own handle
/// to the underlying storage, so they stay valid while the value lives.
pub trait ValueCursor: Send {
    /// Whether an unvisited element remains.
    fn more(&self) -> bool;

    /// Advance onto the next element.
    fn next(&mut self);

    /// Element under the cursor; fails before the first `next()` and after
    /// the cursor ran off the end.
    fn current(&self) -> EvalResult;
}

/// Produces cursors for the values it accepts.
pub trait IteratorProvider: Send + Sync {
    /// Strategy name, for tracing.
    fn name(&self) -> &'static str;

    fn can_iterate(&self, value: &Value) -> bool;

    fn iterator(&self, value: &Value) -> Result<Box<dyn ValueCursor>, EvalError>;
}

/// Adapts a `ValueCursor` to `std::iter::Iterator`.
pub struct Cursor {
    inner: Box<dyn ValueCursor>,
}

impl Cursor {
    pub fn new(inner: Box<dyn ValueCursor>) -> Self {
        Cursor { inner }
    }
}

impl Iterator for Cursor {
    type Item = EvalResult;

    fn next(&mut self) -> Option<EvalResult> {
        if !self.inner.more() {
            return None;
        }
        ValueCursor::next(&mut *self.inner);
        Some(self.inner.current())
    }
}

/// Ordered iterator-provider chain; first applicable provider wins.
#[derive(Default)]
pub struct IteratorRegistry {
    providers: Vec<Box<dyn IteratorProvider>>,
}

impl IteratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: impl IteratorProvider + 'static) {
        tracing::debug!(provider = provider.name(), "registered iterator provider");
        self.providers.push(Box::new(provider));
    }

    pub fn find(&self, value: &Value) -> Option<&dyn IteratorProvider> {
        self.providers
            .iter()
            .find(|provider| provider.can_iterate(value))
            .map(|strategy| &**strategy)
    }

    pub fn can_iterate(&self, value: &Value) -> bool {
        self.find(value).is_some()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(ty = value.type_name()))]
    pub fn iterator(&self, value: &Value) -> Result<Box<dyn ValueCursor>, EvalError> {
        match self.find(value) {
            Some(provider) => {
                tracing::trace!(provider = provider.name(), "dispatch");
                provider.iterator(value)
            }
            None => Err(not_iterable(value.type_name())),
        }
    }

    /// Cursor over `value` as a std iterator.
    pub fn iter(&self, value: &Value) -> Result<Cursor, EvalError> {
        self.iterator(value).map(Cursor::new)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
