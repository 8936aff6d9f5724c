//! Template store adapters.

mod builtin;

pub use builtin::BuiltinTemplateStore;
