//! Asset lookup by name.

use crate::casing::{camelize, capitalize};
use crate::diagnostics::{Diagnostic, WarnSink};
use crate::field::AssetKind;
use crate::value::{Options, Value};

/// Find an asset of `kind` registered under `id` in merged `options`.
///
/// Tries the exact id, then its camel-cased form, then the capitalized
/// camel-cased form. Own entries are checked for all three spellings before
/// the ancestor chain is consulted. A non-string `id` resolves to nothing
/// without a warning.
pub fn resolve_asset<'a>(
    options: &'a Options,
    kind: AssetKind,
    id: &Value,
    warn_missing: bool,
    sink: &dyn WarnSink,
) -> Option<&'a Value> {
    let id = id.as_str()?;
    let assets = options.get(kind.field_name());

    let camelized = camelize(id);
    let pascal = capitalize(&camelized);
    let spellings = [id, camelized.as_str(), pascal.as_str()];

    let found = match assets {
        Some(Value::Linked(registry)) => spellings
            .iter()
            .find_map(|name| registry.get_own(name))
            .or_else(|| spellings.iter().find_map(|name| registry.get(name))),
        Some(Value::Object(registry)) => spellings.iter().find_map(|name| registry.get(*name)),
        _ => None,
    };

    if found.is_none() && warn_missing {
        sink.warn(
            &Diagnostic::UnresolvedAsset {
                kind: kind.as_str().to_string(),
                id: id.to_string(),
            },
            None,
        );
    }
    found
}
