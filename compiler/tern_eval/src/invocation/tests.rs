use super::*;
use crate::context::ParserContext;
use pretty_assertions::assert_eq;
use tern_value::EvalErrorKind;

#[test]
fn build_requires_default() {
    let parser = ParserContext::new();
    let err = InvocationContext::builder(&parser)
        .with("x", 1)
        .build()
        .err()
        .unwrap();
    assert_eq!(err.kind(), &EvalErrorKind::MissingDefault);
}

#[test]
fn absent_is_a_valid_default() {
    let parser = ParserContext::new();
    let ctx = parser.invocation().use_default(Value::Absent).build().unwrap();
    assert!(ctx.default_value().is_absent());
}

#[test]
fn extras_are_retrievable() {
    let parser = ParserContext::new();
    let ctx = parser
        .invocation()
        .with("a", 1)
        .use_default("root")
        .with("b", true)
        .build()
        .unwrap();
    assert_eq!(ctx.default_value(), &Value::string("root"));
    assert_eq!(ctx.extra("a").unwrap(), &Value::int(1));
    assert_eq!(ctx.extra("b").unwrap(), &Value::Bool(true));
    assert!(ctx.has_extra("a"));
    assert!(!ctx.has_extra("c"));

    let mut names: Vec<_> = ctx.extras().map(|(name, _)| name).collect();
    names.sort_unstable();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn repeated_extra_keeps_last() {
    let parser = ParserContext::new();
    let ctx = parser
        .invocation()
        .use_default(Value::Absent)
        .with("a", 1)
        .with("a", 2)
        .build()
        .unwrap();
    assert_eq!(ctx.extra("a").unwrap(), &Value::int(2));
}

#[test]
fn repeated_default_keeps_last() {
    let parser = ParserContext::new();
    let ctx = parser.invocation().use_default(1).use_default(2).build().unwrap();
    assert_eq!(ctx.default_value(), &Value::int(2));
}

#[test]
fn missing_extra_names_the_binding() {
    let parser = ParserContext::new();
    let ctx = parser.invocation().use_default(Value::Absent).build().unwrap();
    let err = ctx.extra("user").unwrap_err();
    assert_eq!(err.to_string(), "no extra named `user` in invocation context");
}

#[test]
fn parser_handle_is_the_builder_parser() {
    let parser = ParserContext::with_builtins();
    let ctx = parser.invocation().use_default(Value::Absent).build().unwrap();
    assert!(std::ptr::eq(ctx.parser(), &parser));
}
