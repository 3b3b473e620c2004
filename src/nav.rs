//! In-page navigation targets and reveal timing.

use std::time::Duration;

/// An anchor link shown in both the desktop bar and the mobile overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// In-page anchor, including the `#`.
    pub href: &'static str,
    /// Visible text.
    pub label: &'static str,
}

/// An icon link in the overlay's social row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub network: &'static str,
    pub href: &'static str,
    /// Hover color of the network's brand.
    pub accent: &'static str,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink { href: "#inicio", label: "Inicio" },
    NavLink { href: "#empresa", label: "Empresa" },
    NavLink { href: "#servicios", label: "Servicios" },
    NavLink { href: "#contacto", label: "Contacto" },
];

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink { network: "Facebook", href: "#", accent: "#4267B2" },
    SocialLink { network: "Instagram", href: "#", accent: "#E1306C" },
    SocialLink { network: "Twitter", href: "#", accent: "#1DA1F2" },
];

/// One staggered child of the mobile overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayItem {
    Link(NavLink),
    /// The social icons, animated as a single row.
    SocialRow,
}

/// Overlay children in cascade order: every nav link, then the social row.
pub const OVERLAY_ITEMS: [OverlayItem; 5] = [
    OverlayItem::Link(NAV_LINKS[0]),
    OverlayItem::Link(NAV_LINKS[1]),
    OverlayItem::Link(NAV_LINKS[2]),
    OverlayItem::Link(NAV_LINKS[3]),
    OverlayItem::SocialRow,
];

/// Delay between consecutive items when a row reveals itself.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);

/// Look up a link by its anchor.
pub fn find_link(href: &str) -> Option<&'static NavLink> {
    NAV_LINKS.iter().find(|link| link.href == href)
}

/// Start delay of each item in a left-to-right reveal (`index * REVEAL_STAGGER`).
///
/// The desktop nav reveals its links this way on mount.
pub fn reveal_delays(count: usize) -> impl Iterator<Item = Duration> {
    (0..count).map(|index| REVEAL_STAGGER * index as u32)
}
