use super::*;
use crate::context::ParserContext;
use pretty_assertions::assert_eq;
use tern_value::{access_failed, EvalErrorKind};

/// A record-like list: `[name, age]`, accessed by field name.
struct PairAccessor;

impl crate::registry::Accessor for PairAccessor {
    fn name(&self) -> &'static str {
        "pair"
    }

    fn can_access(&self, value: &Value) -> bool {
        value.as_list().is_some_and(|items| items.len() == 2)
    }

    fn access(&self, value: &Value, name: &str) -> EvalResult {
        let items = value.get::<Vec<Value>>()?;
        match name {
            "first" => Ok(items[0].clone()),
            "second" => Ok(items[1].clone()),
            _ => Err(access_failed(name, "pair", "no such field")),
        }
    }
}

fn parser() -> ParserContext {
    let mut ctx = ParserContext::new();
    ctx.register_accessor(PairAccessor);
    ctx
}

fn pair(first: impl Into<Value>, second: impl Into<Value>) -> Value {
    Value::list(vec![first.into(), second.into()])
}

#[test]
fn literal_ignores_context() {
    let parser = parser();
    let ctx = parser.invocation().use_default(Value::Absent).build().unwrap();
    let node = SharedRetriever::literal("fixed");
    assert_eq!(node.retrieve(&ctx).unwrap(), Value::string("fixed"));
}

#[test]
fn default_yields_default() {
    let parser = parser();
    let ctx = parser.invocation().use_default(5).build().unwrap();
    assert_eq!(
        SharedRetriever::default_value().retrieve(&ctx).unwrap(),
        Value::int(5)
    );
}

#[test]
fn extra_yields_named_binding() {
    let parser = parser();
    let ctx = parser
        .invocation()
        .use_default(Value::Absent)
        .with("user", "ada")
        .build()
        .unwrap();
    assert_eq!(
        SharedRetriever::extra("user").retrieve(&ctx).unwrap(),
        Value::string("ada")
    );
}

#[test]
fn missing_extra_fails() {
    let parser = parser();
    let ctx = parser.invocation().use_default(Value::Absent).build().unwrap();
    let err = SharedRetriever::extra("user").retrieve(&ctx).unwrap_err();
    assert_eq!(
        err.kind(),
        &EvalErrorKind::MissingExtra {
            name: "user".into()
        }
    );
}

#[test]
fn property_path_walks_accessors() {
    let parser = parser();
    let inner = pair("ada", 36);
    let outer = pair(inner, Value::Absent);
    let node = SharedRetriever::default_value().path(["first", "second"]);
    assert_eq!(parser.retrieve_with(&node, outer).unwrap(), Value::int(36));
}

#[test]
fn property_failure_propagates() {
    let parser = parser();
    let node = SharedRetriever::default_value().property("third");
    let err = parser.retrieve_with(&node, pair(1, 2)).unwrap_err();
    assert!(matches!(err.kind(), EvalErrorKind::AccessFailed { .. }));
}

#[test]
fn property_on_unsupported_value() {
    let parser = parser();
    let node = SharedRetriever::default_value().property("first");
    let err = parser.retrieve_with(&node, 3).unwrap_err();
    assert_eq!(
        err.kind(),
        &EvalErrorKind::AccessUnsupported {
            type_name: "int".into()
        }
    );
}

#[test]
fn tree_is_reusable_across_contexts() {
    let parser = parser();
    let node = SharedRetriever::default_value().property("second");
    assert_eq!(parser.retrieve_with(&node, pair(0, 1)).unwrap(), Value::int(1));
    assert_eq!(parser.retrieve_with(&node, pair(0, "x")).unwrap(), Value::string("x"));
}

#[test]
fn deep_chain_evaluates() {
    let parser = parser();
    let mut value = Value::int(0);
    let depth = 2_000;
    for _ in 0..depth {
        value = pair(value, Value::Absent);
    }
    let node = SharedRetriever::default_value().path(std::iter::repeat("first").take(depth));
    assert_eq!(parser.retrieve_with(&node, value).unwrap(), Value::int(0));
}
