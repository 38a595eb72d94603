//! Game data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Platforms a game can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Pc,
    Console,
    Mobile,
    Web,
    CrossPlatform,
    Vr,
}

impl Platform {
    /// Storage token for this platform.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Console => "console",
            Platform::Mobile => "mobile",
            Platform::Web => "web",
            Platform::CrossPlatform => "cross_platform",
            Platform::Vr => "vr",
        }
    }

    /// Parse a storage token back into a platform.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pc" => Some(Platform::Pc),
            "console" => Some(Platform::Console),
            "mobile" => Some(Platform::Mobile),
            "web" => Some(Platform::Web),
            "cross_platform" => Some(Platform::CrossPlatform),
            "vr" => Some(Platform::Vr),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::Pc => "PC",
            Platform::Console => "Console",
            Platform::Mobile => "Mobile",
            Platform::Web => "Web",
            Platform::CrossPlatform => "Cross-Platform",
            Platform::Vr => "VR",
        };
        f.write_str(name)
    }
}

/// A game in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub public_id: Uuid,
    pub title: String,
    pub genre: String,
    pub platform: Platform,
}
