use serde::{Deserialize, Serialize};

/// Tile-provider credential. Passed through to the renderer untouched and
/// never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccessToken(<empty>)")
        } else {
            f.write_str("AccessToken(<redacted>)")
        }
    }
}

/// One selectable background style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub name: String,
    pub style_id: String,
    pub attribution: String,
}

/// Tile provider settings shared by both background layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileProviderConfig {
    pub url_template: String,
    pub tile_size: u32,
    pub max_zoom: u8,
    pub zoom_offset: i8,
    pub access_token: AccessToken,
    pub light: StyleConfig,
    pub dark: StyleConfig,
}

pub const MAPBOX_URL_TEMPLATE: &str =
    "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";

impl Default for TileProviderConfig {
    fn default() -> Self {
        Self {
            url_template: MAPBOX_URL_TEMPLATE.to_string(),
            tile_size: 512,
            max_zoom: 18,
            zoom_offset: -1,
            access_token: AccessToken::default(),
            light: StyleConfig {
                name: "Street Map".to_string(),
                style_id: "mapbox/streets-v11".to_string(),
                attribution: "© <a href='https://www.mapbox.com/about/maps/'>Mapbox</a> \
                    © <a href='http://www.openstreetmap.org/copyright'>OpenStreetMap</a> \
                    <strong><a href='https://www.mapbox.com/map-feedback/' target='_blank'>Improve this map</a></strong>"
                    .to_string(),
            },
            dark: StyleConfig {
                name: "Dark Map".to_string(),
                style_id: "mapbox/dark-v10".to_string(),
                attribution: "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, \
                    <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, \
                    Imagery © <a href=\"https://www.mapbox.com/\">Mapbox</a>"
                    .to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseStyle {
    Light,
    Dark,
}

/// Options handed to the renderer's tile layer constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerConfig {
    pub url_template: String,
    pub attribution_text: String,
    pub tile_size: u32,
    pub max_zoom: u8,
    pub zoom_offset: i8,
    pub style_id: String,
    pub access_token: AccessToken,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLayer {
    pub name: String,
    pub style: BaseStyle,
    pub tile: TileLayerConfig,
}

impl TileProviderConfig {
    /// The light layer first; it is the one shown on load.
    pub fn base_layers(&self) -> Vec<BaseLayer> {
        vec![
            self.layer(BaseStyle::Light, &self.light),
            self.layer(BaseStyle::Dark, &self.dark),
        ]
    }

    fn layer(&self, style: BaseStyle, config: &StyleConfig) -> BaseLayer {
        BaseLayer {
            name: config.name.clone(),
            style,
            tile: TileLayerConfig {
                url_template: self.url_template.clone(),
                attribution_text: config.attribution.clone(),
                tile_size: self.tile_size,
                max_zoom: self.max_zoom,
                zoom_offset: self.zoom_offset,
                style_id: config.style_id.clone(),
                access_token: self.access_token.clone(),
            },
        }
    }
}
