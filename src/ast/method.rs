use crate::scope::FnSymbol;

use super::Stmt;

/// `Method { name, parameters: [name], parameterTypeNames: [typeName],
/// returnTypeName: Option<typeName>, body: [Stmt], function: Option<FnSymbol>
/// }` (spec.md §3.2).
#[derive(Clone)]
pub struct Method<T> {
    pub name: String,
    pub parameters: Vec<String>,
    pub parameter_type_names: Vec<String>,
    pub return_type_name: Option<String>,
    pub body: Vec<Stmt<T>>,
    pub position: usize,
    pub function: Option<FnSymbol>,
}
