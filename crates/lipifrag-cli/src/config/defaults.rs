use lipifrag::engine::config::{DEFAULT_CARBON_BOND_LENGTH, DEFAULT_HYDROGEN_BOND_LENGTH};

pub struct DefaultsConfig {
    pub carbon_bond_length: f64,
    pub hydrogen_bond_length: f64,
    pub add_cap_hydrogens: bool,
    pub single_fragments: bool,
    pub double_fragments: bool,
    pub dimers: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            carbon_bond_length: DEFAULT_CARBON_BOND_LENGTH,
            hydrogen_bond_length: DEFAULT_HYDROGEN_BOND_LENGTH,
            add_cap_hydrogens: true,
            single_fragments: true,
            double_fragments: true,
            dimers: true,
        }
    }
}
