//! Rewrite shorthand declarations into their canonical shapes.
//!
//! Runs on the child options before any field is merged, so every strategy
//! only ever sees one shape per field.

use crate::casing::camelize;
use crate::diagnostics::{Diagnostic, WarnSink};
use crate::instance::Instance;
use crate::value::{object, present, Object, Options, Value};

/// `props`: `["a-b"]` or `{ "a-b": Type | { ... } }` become
/// `{ "aB": { "type": ... } }`.
pub fn normalize_props(options: &mut Options, sink: &dyn WarnSink, vm: Option<&Instance>) {
    let Some(props) = present(options.get("props")) else {
        return;
    };

    let mut normalized = Object::new();
    match props {
        Value::Array(names) => {
            for name in names {
                match name {
                    Value::String(name) => {
                        normalized.insert(
                            camelize(name),
                            Value::Object(object([("type", Value::Null)])),
                        );
                    }
                    _ => sink.warn(
                        &Diagnostic::ArrayOfStrings {
                            option: "props".into(),
                        },
                        vm,
                    ),
                }
            }
        }
        Value::Object(_) | Value::Linked(_) => {
            for (name, declared) in props.entries().unwrap_or_default() {
                let descriptor = match declared {
                    Value::Object(_) => declared,
                    other => Value::Object(object([("type", other)])),
                };
                normalized.insert(camelize(&name), descriptor);
            }
        }
        other => sink.warn(
            &Diagnostic::InvalidArrayOrObject {
                option: "props".into(),
                got: other.type_name().into(),
            },
            vm,
        ),
    }
    options.insert("props".into(), Value::Object(normalized));
}

/// `inject`: `["x"]` or `{ local: "source" | { ... } }` become
/// `{ local: { "from": source, ... } }`.
pub fn normalize_inject(options: &mut Options, sink: &dyn WarnSink, vm: Option<&Instance>) {
    let Some(inject) = present(options.get("inject")) else {
        return;
    };

    let mut normalized = Object::new();
    match inject {
        Value::Array(names) => {
            for name in names {
                match name {
                    Value::String(name) => {
                        normalized.insert(
                            name.clone(),
                            Value::Object(object([("from", name.as_str())])),
                        );
                    }
                    _ => sink.warn(
                        &Diagnostic::ArrayOfStrings {
                            option: "inject".into(),
                        },
                        vm,
                    ),
                }
            }
        }
        Value::Object(_) | Value::Linked(_) => {
            for (key, declared) in inject.entries().unwrap_or_default() {
                let descriptor = match declared {
                    Value::Object(fields) => {
                        let mut descriptor = object([("from", key.as_str())]);
                        descriptor.extend(fields);
                        descriptor
                    }
                    source => object([("from", source)]),
                };
                normalized.insert(key, Value::Object(descriptor));
            }
        }
        other => sink.warn(
            &Diagnostic::InvalidArrayOrObject {
                option: "inject".into(),
                got: other.type_name().into(),
            },
            vm,
        ),
    }
    options.insert("inject".into(), Value::Object(normalized));
}

/// `directives`: a bare function `f` becomes `{ bind: f, update: f }`.
pub fn normalize_directives(options: &mut Options) {
    let Some(Value::Object(directives)) = options.get_mut("directives") else {
        return;
    };
    for definition in directives.values_mut() {
        if let Value::Function(f) = definition {
            let f = f.clone();
            *definition = Value::Object(object([
                ("bind", Value::Function(f.clone())),
                ("update", Value::Function(f)),
            ]));
        }
    }
}

/// All three normalizers, in order.
pub fn normalize(options: &mut Options, sink: &dyn WarnSink, vm: Option<&Instance>) {
    normalize_props(options, sink, vm);
    normalize_inject(options, sink, vm);
    normalize_directives(options);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::value::Function;
    use serde_json::json;

    fn options(json: serde_json::Value) -> Options {
        match Value::from_json(json) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_props_array_syntax() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({"props": ["a-b", "plain"]}));
        normalize_props(&mut opts, &sink, None);
        assert_eq!(
            opts["props"].to_json(),
            json!({"aB": {"type": null}, "plain": {"type": null}})
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_props_array_rejects_non_strings() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({"props": ["ok", 3]}));
        normalize_props(&mut opts, &sink, None);
        assert_eq!(opts["props"].to_json(), json!({"ok": {"type": null}}));
        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::ArrayOfStrings { option: "props".into() }]
        );
    }

    #[test]
    fn test_props_object_syntax() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({
            "props": {"c": {"type": "String"}, "max-len": "Number"}
        }));
        normalize_props(&mut opts, &sink, None);
        assert_eq!(
            opts["props"].to_json(),
            json!({"c": {"type": "String"}, "maxLen": {"type": "Number"}})
        );
    }

    #[test]
    fn test_props_invalid_shape_leaves_empty_map() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({"props": "nope"}));
        normalize_props(&mut opts, &sink, None);
        assert_eq!(opts["props"].to_json(), json!({}));
        assert_eq!(sink.diagnostics()[0].code(), "INVALID_ARRAY_OR_OBJECT");
    }

    #[test]
    fn test_missing_fields_are_untouched() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({"name": "x"}));
        normalize(&mut opts, &sink, None);
        assert_eq!(opts.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_inject_array_syntax() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({"inject": ["x"]}));
        normalize_inject(&mut opts, &sink, None);
        assert_eq!(opts["inject"].to_json(), json!({"x": {"from": "x"}}));
    }

    #[test]
    fn test_inject_object_syntax() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({
            "inject": {
                "local": "source",
                "withDefault": {"default": 1},
                "renamed": {"from": "other", "default": 2}
            }
        }));
        normalize_inject(&mut opts, &sink, None);
        assert_eq!(
            opts["inject"].to_json(),
            json!({
                "local": {"from": "source"},
                "withDefault": {"from": "withDefault", "default": 1},
                "renamed": {"from": "other", "default": 2}
            })
        );
    }

    #[test]
    fn test_inject_invalid_shape_warns() {
        let sink = CollectingSink::new();
        let mut opts = options(json!({"inject": 5}));
        normalize_inject(&mut opts, &sink, None);
        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::InvalidArrayOrObject {
                option: "inject".into(),
                got: "Number".into()
            }]
        );
    }

    #[test]
    fn test_directive_function_shorthand() {
        let f = Function::noop("focus");
        let mut opts = Options::new();
        opts.insert(
            "directives".into(),
            Value::Object(object([
                ("focus", Value::Function(f.clone())),
                ("full", Value::Object(object([("bind", Value::Null)]))),
            ])),
        );
        normalize_directives(&mut opts);

        let focus = opts["directives"].get("focus").unwrap();
        let bind = focus.get("bind").and_then(Value::as_function).unwrap();
        let update = focus.get("update").and_then(Value::as_function).unwrap();
        assert!(Function::ptr_eq(bind, &f));
        assert!(Function::ptr_eq(update, &f));
        assert_eq!(
            opts["directives"].get("full"),
            Some(&Value::Object(object([("bind", Value::Null)])))
        );
    }
}
