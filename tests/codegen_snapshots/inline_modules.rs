use rust_decimal::Decimal;

pub struct Invoice {
    #[stringify(1)]
    pub Total: Decimal,
}

pub mod rates {
    use rust_decimal::Decimal;

    pub struct Rate {
        #[stringify(0)]
        pub value: Decimal,
    }
}
