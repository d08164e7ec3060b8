impl Price {
    pub fn get_gross_string(&self) -> String {
        let strategy = ::rust_decimal::RoundingStrategy::MidpointNearestEven;
        self.gross.round_dp_with_strategy(4, strategy).to_string()
    }
    pub fn get_net_string(&self) -> String {
        let strategy = ::rust_decimal::RoundingStrategy::MidpointAwayFromZero;
        self.net.round_dp_with_strategy(4, strategy).to_string()
    }
}
