use thiserror::Error;

/// Default length of the bond from a retained atom to its cap carbon, in Angstroms.
pub const DEFAULT_CARBON_BOND_LENGTH: f64 = 1.54;
/// Default length of the cap carbon's C-H bonds, in Angstroms.
pub const DEFAULT_HYDROGEN_BOND_LENGTH: f64 = 1.10;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter {parameter}: {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CappingConfig {
    pub carbon_bond_length: f64,
    pub hydrogen_bond_length: f64,
    /// When false, caps are a bare carbon with no hydrogens.
    pub add_cap_hydrogens: bool,
}

impl Default for CappingConfig {
    fn default() -> Self {
        Self {
            carbon_bond_length: DEFAULT_CARBON_BOND_LENGTH,
            hydrogen_bond_length: DEFAULT_HYDROGEN_BOND_LENGTH,
            add_cap_hydrogens: true,
        }
    }
}

/// Which fragment kinds a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub single_fragments: bool,
    pub double_fragments: bool,
    pub dimers: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            single_fragments: true,
            double_fragments: true,
            dimers: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FragmentationConfig {
    pub capping: CappingConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Default)]
pub struct FragmentationConfigBuilder {
    carbon_bond_length: Option<f64>,
    hydrogen_bond_length: Option<f64>,
    add_cap_hydrogens: Option<bool>,
    single_fragments: Option<bool>,
    double_fragments: Option<bool>,
    dimers: Option<bool>,
}

impl FragmentationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn carbon_bond_length(mut self, length: f64) -> Self {
        self.carbon_bond_length = Some(length);
        self
    }
    pub fn hydrogen_bond_length(mut self, length: f64) -> Self {
        self.hydrogen_bond_length = Some(length);
        self
    }
    pub fn add_cap_hydrogens(mut self, enabled: bool) -> Self {
        self.add_cap_hydrogens = Some(enabled);
        self
    }
    pub fn single_fragments(mut self, enabled: bool) -> Self {
        self.single_fragments = Some(enabled);
        self
    }
    pub fn double_fragments(mut self, enabled: bool) -> Self {
        self.double_fragments = Some(enabled);
        self
    }
    pub fn dimers(mut self, enabled: bool) -> Self {
        self.dimers = Some(enabled);
        self
    }

    /// Validates the collected settings.
    ///
    /// Both bond lengths are required and must be finite and positive. Capping
    /// hydrogens and every extraction mode default to enabled.
    pub fn build(self) -> Result<FragmentationConfig, ConfigError> {
        let carbon_bond_length = self
            .carbon_bond_length
            .ok_or(ConfigError::MissingParameter("carbon_bond_length"))?;
        let hydrogen_bond_length = self
            .hydrogen_bond_length
            .ok_or(ConfigError::MissingParameter("hydrogen_bond_length"))?;
        validate_length("carbon_bond_length", carbon_bond_length)?;
        validate_length("hydrogen_bond_length", hydrogen_bond_length)?;

        Ok(FragmentationConfig {
            capping: CappingConfig {
                carbon_bond_length,
                hydrogen_bond_length,
                add_cap_hydrogens: self.add_cap_hydrogens.unwrap_or(true),
            },
            extraction: ExtractionConfig {
                single_fragments: self.single_fragments.unwrap_or(true),
                double_fragments: self.double_fragments.unwrap_or(true),
                dimers: self.dimers.unwrap_or(true),
            },
        })
    }
}

fn validate_length(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("bond length must be a positive number of Angstroms (got {})", value),
        })
    }
}
