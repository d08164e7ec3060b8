use rust_decimal::Decimal;

pub struct Quote {
    #[stringify(StringificationType::Even4)]
    pub r#type: Decimal,
    #[stringify(Out4)]
    pub bid: Decimal,
}
