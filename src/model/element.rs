//! Chemical element codes and element-derived default colors.
//!
//! The set covers the elements that show up in biomolecular structure
//! files; everything else maps to [`Element::Unknown`] and is colored by
//! the configured fallback.

/// Chemical element of an atom, as reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Element {
    /// Unrecognized element symbol.
    #[default]
    Unknown,
    /// Hydrogen.
    Hydrogen,
    /// Carbon.
    Carbon,
    /// Nitrogen.
    Nitrogen,
    /// Oxygen.
    Oxygen,
    /// Sulfur.
    Sulfur,
    /// Phosphorus.
    Phosphorus,
    /// Fluorine.
    Fluorine,
    /// Chlorine.
    Chlorine,
    /// Bromine.
    Bromine,
    /// Iodine.
    Iodine,
    /// Sodium.
    Sodium,
    /// Magnesium.
    Magnesium,
    /// Potassium.
    Potassium,
    /// Calcium.
    Calcium,
    /// Manganese.
    Manganese,
    /// Iron.
    Iron,
    /// Copper.
    Copper,
    /// Zinc.
    Zinc,
    /// Selenium.
    Selenium,
}

impl Element {
    /// Parse a (possibly padded, mixed-case) element symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Self::Hydrogen,
            "C" => Self::Carbon,
            "N" => Self::Nitrogen,
            "O" => Self::Oxygen,
            "S" => Self::Sulfur,
            "P" => Self::Phosphorus,
            "F" => Self::Fluorine,
            "CL" => Self::Chlorine,
            "BR" => Self::Bromine,
            "I" => Self::Iodine,
            "NA" => Self::Sodium,
            "MG" => Self::Magnesium,
            "K" => Self::Potassium,
            "CA" => Self::Calcium,
            "MN" => Self::Manganese,
            "FE" => Self::Iron,
            "CU" => Self::Copper,
            "ZN" => Self::Zinc,
            "SE" => Self::Selenium,
            _ => Self::Unknown,
        }
    }

    /// Canonical element symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Unknown => "X",
            Self::Hydrogen => "H",
            Self::Carbon => "C",
            Self::Nitrogen => "N",
            Self::Oxygen => "O",
            Self::Sulfur => "S",
            Self::Phosphorus => "P",
            Self::Fluorine => "F",
            Self::Chlorine => "Cl",
            Self::Bromine => "Br",
            Self::Iodine => "I",
            Self::Sodium => "Na",
            Self::Magnesium => "Mg",
            Self::Potassium => "K",
            Self::Calcium => "Ca",
            Self::Manganese => "Mn",
            Self::Iron => "Fe",
            Self::Copper => "Cu",
            Self::Zinc => "Zn",
            Self::Selenium => "Se",
        }
    }

    /// CPK-style default RGB color. [`Element::Unknown`] has no entry here;
    /// callers substitute the configured fallback color.
    #[must_use]
    pub fn cpk_color(self) -> Option<[f32; 3]> {
        match self {
            Self::Unknown => None,
            Self::Hydrogen => Some([0.9, 0.9, 0.9]),
            Self::Carbon => Some([0.35, 0.35, 0.35]),
            Self::Nitrogen => Some([0.19, 0.31, 0.97]),
            Self::Oxygen => Some([1.0, 0.05, 0.05]),
            Self::Sulfur => Some([1.0, 1.0, 0.19]),
            Self::Phosphorus => Some([1.0, 0.5, 0.0]),
            Self::Fluorine => Some([0.56, 0.88, 0.31]),
            Self::Chlorine => Some([0.12, 0.94, 0.12]),
            Self::Bromine => Some([0.65, 0.16, 0.16]),
            Self::Iodine => Some([0.58, 0.0, 0.58]),
            Self::Sodium => Some([0.67, 0.36, 0.95]),
            Self::Magnesium => Some([0.54, 1.0, 0.0]),
            Self::Potassium => Some([0.56, 0.25, 0.83]),
            Self::Calcium => Some([0.24, 1.0, 0.0]),
            Self::Manganese => Some([0.61, 0.48, 0.78]),
            Self::Iron => Some([0.88, 0.4, 0.2]),
            Self::Copper => Some([0.78, 0.5, 0.2]),
            Self::Zinc => Some([0.49, 0.5, 0.69]),
            Self::Selenium => Some([1.0, 0.63, 0.0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_round_trips() {
        for e in [
            Element::Hydrogen,
            Element::Carbon,
            Element::Chlorine,
            Element::Iron,
            Element::Selenium,
        ] {
            assert_eq!(Element::from_symbol(e.symbol()), e);
        }
    }

    #[test]
    fn symbol_parsing_is_case_and_padding_insensitive() {
        assert_eq!(Element::from_symbol(" fe "), Element::Iron);
        assert_eq!(Element::from_symbol("cl"), Element::Chlorine);
        assert_eq!(Element::from_symbol("ZN"), Element::Zinc);
    }

    #[test]
    fn unknown_symbols_map_to_unknown() {
        assert_eq!(Element::from_symbol("Xx"), Element::Unknown);
        assert_eq!(Element::from_symbol(""), Element::Unknown);
        assert!(Element::Unknown.cpk_color().is_none());
    }

    #[test]
    fn known_elements_have_colors() {
        assert_eq!(Element::Oxygen.cpk_color(), Some([1.0, 0.05, 0.05]));
        assert!(Element::Carbon.cpk_color().is_some());
    }
}
