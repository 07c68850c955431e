use super::{Field, Method};

/// `Source { fields: [Field], methods: [Method] }` — the top-level
/// compilation unit (spec.md §3.2).
#[derive(Clone)]
pub struct Source<T> {
    pub fields: Vec<Field<T>>,
    pub methods: Vec<Method<T>>,
}
