//! spec §4.7's literal "process-wide registry keyed by type identity",
//! for the one case the trait-dispatch path in [`crate::dispatch`] can't
//! cover: a caller holding a value only known by `TypeId` at runtime (e.g.
//! a `Vec<Box<dyn Any>>` of heterogeneous records that must each be dumped
//! without static knowledge of which concrete type it is).
//!
//! The source used the address of a monomorphised per-type helper function
//! as its key, since C++ has no portable runtime type identity without
//! RTTI. Rust's `TypeId` *is* a portable, stable per-type identity, so it
//! is used directly rather than reproduced. Registration happens lazily,
//! under a lock, the first time a type is looked up — not via ordered
//! static initializers (no crate in the corpus's dependency tree provides
//! one, e.g. `ctor`/`inventory`, so none is added) — which trivially
//! satisfies spec §5's "registry tolerates arbitrary initialization order"
//! requirement, since idempotent lazy insertion cannot race against itself
//! in a way that is visible to callers.

use std::any::{Any, TypeId};
use std::io;
use std::sync::{OnceLock, RwLock};

use json_emit::{Emitter, EmitOptions};
use json_parser::Error;
use rustc_hash::FxHashMap;

use crate::dispatch::{dump_object, dump_scalar, parse_object, parse_scalar};
use crate::stream::EventSource;
use crate::traits::{JsonObject, JsonScalar};
use crate::warning::BinderWarning;

type BoxedValue = Box<dyn Any + Send + Sync>;
type ParseFn = for<'a> fn(
    &mut dyn EventSource<'a>,
    &mut dyn FnMut(BinderWarning),
) -> Result<BoxedValue, Error>;
type DumpFn = fn(&(dyn Any + Send + Sync), &mut Emitter<Vec<u8>>) -> io::Result<()>;

/// Mirrors spec §3's `{ type-key, kind, parse-fn pointer, dump-fn pointer }`
/// registry entry.
struct RegistryEntry {
    kind: RegistryKind,
    parse: ParseFn,
    dump: DumpFn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryKind {
    Scalar,
    Object,
}

static REGISTRY: OnceLock<RwLock<FxHashMap<TypeId, RegistryEntry>>> = OnceLock::new();

fn registry() -> &'static RwLock<FxHashMap<TypeId, RegistryEntry>> {
    REGISTRY.get_or_init(|| RwLock::new(FxHashMap::default()))
}

/// Idempotent. Safe to call redundantly from multiple call sites/threads —
/// the read-then-maybe-write pattern means a race only ever results in the
/// same entry being computed twice and one copy discarded, never a torn
/// read.
pub fn ensure_registered_object<T: JsonObject + Send + Sync + 'static>() {
    let type_id = TypeId::of::<T>();
    if registry().read().unwrap().contains_key(&type_id) {
        return;
    }
    let entry = RegistryEntry {
        kind: RegistryKind::Object,
        parse: |stream, warn| {
            let value: T = parse_object(stream, warn)?;
            Ok(Box::new(value))
        },
        dump: |value, emitter| {
            let value = value
                .downcast_ref::<T>()
                .expect("registry dump fn called with the wrong concrete type");
            dump_object(value, emitter)
        },
    };
    registry().write().unwrap().entry(type_id).or_insert(entry);
}

pub fn ensure_registered_scalar<T: JsonScalar + Default + Send + Sync + 'static>() {
    let type_id = TypeId::of::<T>();
    if registry().read().unwrap().contains_key(&type_id) {
        return;
    }
    let entry = RegistryEntry {
        kind: RegistryKind::Scalar,
        parse: |stream, warn| {
            let value: T = parse_scalar(stream, warn)?;
            Ok(Box::new(value))
        },
        dump: |value, emitter| {
            let value = value
                .downcast_ref::<T>()
                .expect("registry dump fn called with the wrong concrete type");
            dump_scalar(value, emitter)
        },
    };
    registry().write().unwrap().entry(type_id).or_insert(entry);
}

pub fn is_registered(type_id: TypeId) -> bool {
    registry().read().unwrap().contains_key(&type_id)
}

pub fn kind_of(type_id: TypeId) -> Option<RegistryKind> {
    registry().read().unwrap().get(&type_id).map(|e| e.kind)
}

/// Parses `T` via its registered entry (registering it first if this is the
/// first time `T` has been seen). This is functionally identical to calling
/// [`crate::parse_object`]/[`crate::parse_scalar`] directly; it exists for
/// callers that only have a `TypeId` to dispatch on — see
/// [`parse_any_registered`].
pub fn parse_registered<'a, T: JsonObject + Send + Sync + 'static>(
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<T, Error> {
    ensure_registered_object::<T>();
    let boxed = parse_any_registered(TypeId::of::<T>(), stream, warn)
        .expect("type was just registered")?;
    Ok(*boxed
        .downcast::<T>()
        .expect("registry parse fn returned the wrong concrete type"))
}

/// Type-erased parse: looks up `type_id` in the registry and runs its
/// parse function, returning a boxed value the caller downcasts. `None` if
/// nothing is registered for `type_id` — the caller should treat this the
/// same as [`BinderWarning::UnregisteredType`] and sink the value itself.
pub fn parse_any_registered<'a>(
    type_id: TypeId,
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Option<Result<BoxedValue, Error>> {
    let parse = {
        let guard = registry().read().unwrap();
        guard.get(&type_id).map(|e| e.parse)
    };
    parse.map(|parse_fn| parse_fn(stream, warn))
}

/// Type-erased dump: looks up `value`'s `TypeId` in the registry and runs
/// its dump function against a fresh two-pass (size-then-write) buffer,
/// returning the serialized string. `None` if `value`'s concrete type was
/// never registered.
pub fn dump_any_registered(value: &(dyn Any + Send + Sync), options: &EmitOptions) -> Option<String> {
    let dump = {
        let guard = registry().read().unwrap();
        guard.get(&value.type_id()).map(|e| e.dump)
    };
    let dump_fn = dump?;
    let mut emitter = Emitter::new(Vec::new(), options.clone());
    dump_fn(value, &mut emitter).ok()?;
    String::from_utf8(emitter.into_inner()).ok()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::field_dumper::FieldDumper;
    use crate::traits::FieldOutcome;
    use json_parser::LexerParser;

    #[derive(Default, Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl JsonObject for Point {
        fn parse_field<'a>(
            &mut self,
            key: &str,
            key_location: json_lexer::SourceLocation,
            stream: &mut dyn EventSource<'a>,
            warn: &mut dyn FnMut(BinderWarning),
        ) -> Result<FieldOutcome, Error> {
            match key {
                "x" => {
                    self.x = parse_scalar(stream, warn)?;
                    Ok(FieldOutcome::Handled)
                }
                "y" => {
                    self.y = parse_scalar(stream, warn)?;
                    Ok(FieldOutcome::Handled)
                }
                _ => crate::sink_unknown_field(key, key_location, stream, warn),
            }
        }

        fn dump_fields<W: std::io::Write>(
            &self,
            dumper: &mut FieldDumper<'_, W>,
        ) -> io::Result<()> {
            dumper.dump_scalar_field("x", &self.x)?;
            dumper.dump_scalar_field("y", &self.y)
        }
    }

    #[test]
    fn registers_lazily_and_idempotently() {
        assert!(!is_registered(TypeId::of::<Point>()));
        ensure_registered_object::<Point>();
        assert!(is_registered(TypeId::of::<Point>()));
        ensure_registered_object::<Point>();
        assert_eq!(kind_of(TypeId::of::<Point>()), Some(RegistryKind::Object));
    }

    #[test]
    fn parses_and_dumps_through_the_type_erased_path() {
        let mut lp = LexerParser::new(r#"{"x": 1, "y": 2}"#);
        let point: Point = parse_registered(&mut lp, &mut crate::warning::ignore_warnings)
            .unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });

        let dumped =
            dump_any_registered(&point as &(dyn Any + Send + Sync), &EmitOptions::compact())
                .unwrap();
        assert_eq!(dumped, r#"{"x":1,"y":2}"#);
    }

    #[test]
    fn unregistered_type_lookup_returns_none() {
        struct NeverRegistered;
        assert!(!is_registered(TypeId::of::<NeverRegistered>()));
    }
}
