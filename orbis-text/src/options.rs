//! Writer configuration.
//!
//! Options are plain values that can be built in code with the `with_*` methods or deserialized, e.g. from a JSON
//! or TOML configuration file. Missing fields take their default values.

use orbis_types::geo::Crs;
use serde::{Deserialize, Deserializer, Serialize};

use crate::number::NumberFormat;

/// Options shared by all text formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Fixed number of fraction digits. `None` writes the shortest exact representation.
    pub decimals: Option<usize>,
    /// Write integral values without a fraction.
    pub compact: bool,
    /// Write `y` before `x`. Ignored by the WKT formats.
    pub swap_xy: bool,
}

impl TextOptions {
    /// Sets the number of fraction digits.
    pub fn with_decimals(mut self, decimals: Option<usize>) -> Self {
        self.decimals = decimals;
        self
    }

    /// Sets compact number output.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Sets the axis swap.
    pub fn with_swap_xy(mut self, swap_xy: bool) -> Self {
        self.swap_xy = swap_xy;
        self
    }

    /// Number format these options describe.
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(self.decimals, self.compact)
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            decimals: None,
            compact: true,
            swap_xy: false,
        }
    }
}

/// GeoJSON writer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoJsonOptions {
    /// Number formatting and axis order. Unlike the other formats, GeoJSON is not compact by default, also when
    /// only some of these fields are configured.
    #[serde(deserialize_with = "geojson_text_options")]
    pub text: TextOptions,
    /// Never write `m` values, even for measured geometries.
    pub ignore_measured: bool,
    /// Drop every feature member that is not part of the GeoJSON specification: named geometries other than
    /// `geometry` and custom members.
    pub ignore_foreign_members: bool,
    /// Write a `crs` member on the top level object when [`GeoJsonOptions::crs`] is not the GeoJSON default.
    pub print_non_default_crs: bool,
    /// Reference system of the written coordinates.
    pub crs: Option<Crs>,
}

impl GeoJsonOptions {
    /// Sets the shared text options.
    pub fn with_text(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }

    /// Sets whether `m` values are dropped.
    pub fn with_ignore_measured(mut self, ignore_measured: bool) -> Self {
        self.ignore_measured = ignore_measured;
        self
    }

    /// Sets whether foreign members are dropped.
    pub fn with_ignore_foreign_members(mut self, ignore_foreign_members: bool) -> Self {
        self.ignore_foreign_members = ignore_foreign_members;
        self
    }

    /// Sets whether a non-default CRS is written.
    pub fn with_print_non_default_crs(mut self, print_non_default_crs: bool) -> Self {
        self.print_non_default_crs = print_non_default_crs;
        self
    }

    /// Sets the reference system.
    pub fn with_crs(mut self, crs: Option<Crs>) -> Self {
        self.crs = crs;
        self
    }

    /// The CRS that must be announced in the output, if any.
    pub(crate) fn announced_crs(&self) -> Option<&Crs> {
        self.crs
            .as_ref()
            .filter(|crs| self.print_non_default_crs && !crs.is_geojson_default())
    }
}

impl Default for GeoJsonOptions {
    fn default() -> Self {
        Self {
            text: TextOptions::default().with_compact(false),
            ignore_measured: false,
            ignore_foreign_members: false,
            print_non_default_crs: false,
            crs: None,
        }
    }
}

/// Text options as configured for GeoJSON: missing fields fall back to the GeoJSON defaults.
#[derive(Deserialize)]
struct PartialTextOptions {
    decimals: Option<usize>,
    compact: Option<bool>,
    swap_xy: Option<bool>,
}

fn geojson_text_options<'de, D>(deserializer: D) -> Result<TextOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let partial = PartialTextOptions::deserialize(deserializer)?;
    let defaults = GeoJsonOptions::default().text;
    Ok(TextOptions {
        decimals: partial.decimals.or(defaults.decimals),
        compact: partial.compact.unwrap_or(defaults.compact),
        swap_xy: partial.swap_xy.unwrap_or(defaults.swap_xy),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert!(TextOptions::default().compact);
        assert!(!GeoJsonOptions::default().text.compact);
    }

    #[test]
    fn partial_deserialization() {
        let options: GeoJsonOptions =
            serde_json::from_str(r#"{"ignore_measured":true,"text":{"decimals":3}}"#).unwrap();
        assert!(options.ignore_measured);
        assert_eq!(options.text.decimals, Some(3));
        assert!(!options.text.compact);
        assert!(!options.print_non_default_crs);

        let options: GeoJsonOptions =
            serde_json::from_str(r#"{"text":{"compact":true,"swap_xy":true}}"#).unwrap();
        assert!(options.text.compact);
        assert!(options.text.swap_xy);
        assert_eq!(options.text.decimals, None);

        let text: TextOptions = serde_json::from_str(r#"{"decimals":3}"#).unwrap();
        assert!(text.compact);
    }

    #[test]
    fn announced_crs() {
        let options = GeoJsonOptions::default().with_crs(Some(Crs::EPSG3857));
        assert!(options.announced_crs().is_none());

        let options = options.with_print_non_default_crs(true);
        assert_eq!(options.announced_crs(), Some(&Crs::EPSG3857));

        let options = options.with_crs(Some(Crs::CRS84));
        assert!(options.announced_crs().is_none());
    }
}
