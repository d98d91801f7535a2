//! Frontend page routes
//!
//! Navigation targets handed back to the frontend, and the paths the
//! single-page app is served on.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Auth,
    Spray,
    AerialFlight,
    Solid,
    Reports,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Auth,
        Page::Spray,
        Page::AerialFlight,
        Page::Solid,
        Page::Reports,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Auth => "/auth",
            Page::Spray => "/pulverizacao",
            Page::AerialFlight => "/voo-agricola",
            Page::Solid => "/solido",
            Page::Reports => "/relatorios",
        }
    }
}

impl Serialize for Page {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.path())
    }
}
