const _: () = {
    use crate::shop::pricing::Quote;
    impl Quote {
        pub fn get_bid_string(&self) -> String {
            let strategy = ::rust_decimal::RoundingStrategy::MidpointAwayFromZero;
            self.bid.round_dp_with_strategy(4, strategy).to_string()
        }
        pub fn get_type_string(&self) -> String {
            let strategy = ::rust_decimal::RoundingStrategy::MidpointNearestEven;
            self.r#type.round_dp_with_strategy(4, strategy).to_string()
        }
    }
};
