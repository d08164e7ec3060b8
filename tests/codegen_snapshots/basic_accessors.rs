use rust_decimal::Decimal;

pub struct Price {
    #[stringify(0)]
    pub net: Decimal,
    #[stringify(1)]
    pub gross: Decimal,
    pub currency: String,
}
