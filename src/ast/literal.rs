use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// The value carried by a `Literal` expression (spec.md §3.2).
#[derive(Clone)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Character(char),
    String(String),
    Integer(BigInt),
    Decimal(BigDecimal),
}
