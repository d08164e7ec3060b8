use rust_decimal::Decimal;

pub struct Ledger {
    #[stringify(7)]
    pub y: Decimal,
    #[stringify(0)]
    pub x: Decimal,
}

pub struct Audit {
    #[stringify(-1)]
    pub delta: Decimal,
}
