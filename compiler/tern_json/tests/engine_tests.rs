//! End-to-end evaluation through the JSON engine.
//!
//! Retriever trees here are built by hand the way an expression compiler
//! would emit them: `.a.b` is a property chain on the default value,
//! `x | f y` binds `f` with parent `x` and argument `y`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tern_eval::{
    Function, InvocationContext, ParserContext, SharedRetriever, TextConstructor, ValueRetriever,
};
use tern_json::{install, Engine};
use tern_value::{EvalError, EvalErrorKind, EvalResult, Value};

// -- Higher-order native function --

/// `list | map expr`: evaluates `expr` once per element, with the element
/// as the default value and the caller's extras carried over.
struct Map;

impl Function for Map {
    fn bind(
        &self,
        _name: &str,
        parent: SharedRetriever,
        args: Vec<SharedRetriever>,
    ) -> Result<SharedRetriever, EvalError> {
        let [body]: [SharedRetriever; 1] = args
            .try_into()
            .map_err(|args: Vec<_>| tern_value::arity_mismatch("map", 1, args.len()))?;
        Ok(SharedRetriever::new(MapRetriever { parent, body }))
    }
}

#[derive(Debug)]
struct MapRetriever {
    parent: SharedRetriever,
    body: SharedRetriever,
}

impl ValueRetriever for MapRetriever {
    fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        let parser = ctx.parser();
        let items = self.parent.retrieve_nested(ctx)?;
        parser
            .iter(&items)?
            .map(|item| {
                let inner = ctx
                    .extras()
                    .fold(parser.invocation().use_default(item?), |builder, (name, value)| {
                        builder.with(name, value.clone())
                    })
                    .build()?;
                self.body.retrieve_nested(&inner)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list)
    }
}

fn engine_with_map() -> Engine {
    tern_eval::init_tracing();
    let engine = Engine::new();
    engine.context().write().register_function("map", Map);
    engine
}

// -- Scenarios --

#[test]
fn interpolation_prints_integral_numbers_plainly() {
    let engine = Engine::new();
    let template = TextConstructor::new()
        .literal("Hello ")
        .value(SharedRetriever::default_value().property("id"));
    assert_eq!(engine.construct(&template, json!({"id": 1})).unwrap(), "Hello 1");
}

#[test]
fn hello_world_from_an_extra() {
    let mut parser = ParserContext::with_builtins();
    install(&mut parser);
    let template = TextConstructor::new()
        .literal("Hello ")
        .value(SharedRetriever::extra("name"))
        .literal("!");
    let ctx = parser
        .invocation()
        .use_default(Value::Absent)
        .with("name", "World")
        .build()
        .unwrap();
    assert_eq!(template.construct(&ctx).unwrap(), "Hello World!");
}

#[test]
fn map_projects_members() {
    let engine = engine_with_map();
    let call = engine
        .bind(
            "map",
            SharedRetriever::default_value(),
            vec![SharedRetriever::default_value().property("id")],
        )
        .unwrap();
    assert_eq!(
        engine.retrieve(&call, json!([{"id": 1}, {"id": 2}])).unwrap(),
        json!([1, 2])
    );
}

#[test]
fn map_sees_outer_extras() {
    let engine = engine_with_map();
    let call = engine
        .bind(
            "map",
            SharedRetriever::default_value(),
            vec![SharedRetriever::extra("prefix")],
        )
        .unwrap();
    let out = engine
        .retrieve_with(&call, json!([0, 0]), [("prefix", json!("p"))])
        .unwrap();
    assert_eq!(out, json!(["p", "p"]));
}

#[test]
fn split_host_function() {
    let engine = Engine::new();
    engine.register_function("split", |argv| {
        let text = argv[1].as_str().ok_or("split: parent must be a string")?;
        let sep = argv[2].as_str().ok_or("split: separator must be a string")?;
        Ok(text.split(sep).map(|part| json!(part)).collect())
    });
    let call = engine
        .bind(
            "split",
            SharedRetriever::literal("1,2,3,4,5"),
            vec![SharedRetriever::literal(",")],
        )
        .unwrap();

    for _ in 0..3 {
        assert_eq!(
            engine.retrieve(&call, json!(null)).unwrap(),
            json!(["1", "2", "3", "4", "5"])
        );
    }
}

#[test]
fn split_result_is_iterable() {
    let engine = engine_with_map();
    engine.register_function("split", |argv| {
        let text = argv[1].as_str().ok_or("not a string")?;
        Ok(text.split(',').map(|part| json!(part)).collect())
    });
    let split = engine
        .bind("split", SharedRetriever::default_value(), Vec::new())
        .unwrap();
    let wrap = engine
        .bind("map", split, vec![SharedRetriever::default_value()])
        .unwrap();
    assert_eq!(engine.retrieve(&wrap, json!("a,b")).unwrap(), json!(["a", "b"]));
}

#[test]
fn missing_member_aborts_evaluation() {
    let engine = Engine::new();
    let node = SharedRetriever::default_value().property("age");
    let err = engine.retrieve(&node, json!({"name": "Ada"})).unwrap_err();
    assert_eq!(
        err.kind(),
        &EvalErrorKind::AccessFailed {
            member: "age".into(),
            type_name: "object".into(),
            reason: "no such member".into(),
        }
    );
}

#[test]
fn builder_without_default_fails() {
    let parser = ParserContext::with_builtins();
    let err = parser.invocation().with("x", 1).build().err().unwrap();
    assert_eq!(err.kind(), &EvalErrorKind::MissingDefault);
}

#[test]
fn host_errors_abort_templates() {
    let engine = Engine::new();
    engine.register_function("boom", |_| Err("exploded".to_string()));
    let call = engine
        .bind("boom", SharedRetriever::default_value(), Vec::new())
        .unwrap();
    let template = TextConstructor::new().literal("a").value(call).literal("b");
    let err = engine.construct(&template, json!(null)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "host error: exploded\n  note: in call to `boom`\n  note: in template fragment 1"
    );
}

#[test]
fn evaluation_from_many_threads() {
    let engine = engine_with_map();
    let call = engine
        .bind(
            "map",
            SharedRetriever::default_value(),
            vec![SharedRetriever::default_value().property("n")],
        )
        .unwrap();

    std::thread::scope(|scope| {
        for t in 0..8_i64 {
            let engine = &engine;
            let call = &call;
            scope.spawn(move || {
                let input: Vec<_> = (0..50).map(|n| json!({"n": n + t})).collect();
                let expected: Vec<_> = (0..50).map(|n| json!(n + t)).collect();
                assert_eq!(
                    engine.retrieve(call, json!(input)).unwrap(),
                    json!(expected)
                );
            });
        }
    });
}

#[test]
fn nested_evaluation_during_registration() {
    let engine = Engine::new();
    let (entered_tx, entered_rx) = mpsc::channel();
    let entered_tx = Mutex::new(entered_tx);
    let inner = engine.clone();
    engine.register_function("nested", move |argv| {
        entered_tx
            .lock()
            .map_err(|err| err.to_string())?
            .send(())
            .map_err(|err| err.to_string())?;
        // Give the registering thread time to queue behind our read guard.
        thread::sleep(Duration::from_millis(200));
        let node = SharedRetriever::default_value().property("inner");
        inner.retrieve(&node, argv[0].clone()).map_err(|err| err.to_string())
    });
    let call = engine
        .bind("nested", SharedRetriever::default_value(), Vec::new())
        .unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    let outer = engine.clone();
    thread::spawn(move || {
        let _ = done_tx.send(outer.retrieve(&call, json!({"inner": 7})));
    });
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    let writer = engine.clone();
    let registration = thread::spawn(move || writer.register_function("late", |_| Ok(json!(null))));

    let out = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("nested evaluation blocked behind a queued registration");
    assert_eq!(out.unwrap(), json!(7));
    assert!(!registration.join().unwrap());
    assert!(engine.context().read().functions().contains("late"));
}
