// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by the gallery and lightbox views.
//!
//! - **Palette**: Base colors (league navy and gold)
//! - **Opacity**: Standardized opacity levels
//! - **Spacing**: Spacing scale (8px grid)
//! - **Sizing**: Thumbnail, lightbox and control sizes
//! - **Typography**: Font size scale
//! - **Radius**: Border radii
//! - **Shadow**: Shadow definitions
//!
//! ```
//! use ifl_gallery::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let backdrop = Color {
//!     a: opacity::BACKDROP,
//!     ..palette::BLACK
//! };
//! let padding = spacing::MD;
//! # let _ = (backdrop, padding);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.12);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.33);
    pub const GRAY_400: Color = Color::from_rgb(0.45, 0.45, 0.48);
    pub const GRAY_200: Color = Color::from_rgb(0.78, 0.78, 0.8);
    pub const GRAY_100: Color = Color::from_rgb(0.93, 0.93, 0.95);

    // League navy
    pub const NAVY_400: Color = Color::from_rgb(0.22, 0.36, 0.62);
    pub const NAVY_500: Color = Color::from_rgb(0.12, 0.24, 0.48);
    pub const NAVY_600: Color = Color::from_rgb(0.08, 0.17, 0.36);

    // League gold, used for focus rings and active chips
    pub const GOLD_400: Color = Color::from_rgb(0.98, 0.8, 0.3);
    pub const GOLD_500: Color = Color::from_rgb(0.93, 0.7, 0.13);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    /// Grid items while the filter fade is running.
    pub const FADED: f32 = 0.25;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    /// Lightbox backdrop.
    pub const BACKDROP: f32 = 0.9;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    /// Grid cell size, matching the 300x200 generated thumbnails.
    pub const THUMBNAIL_WIDTH: f32 = 240.0;
    pub const THUMBNAIL_HEIGHT: f32 = 160.0;

    pub const SEARCH_WIDTH: f32 = 320.0;
    pub const PICK_LIST_WIDTH: f32 = 180.0;

    /// Square navigation and close buttons in the lightbox.
    pub const LIGHTBOX_BUTTON: f32 = 44.0;

    /// Upper bound of the lightbox content panel.
    pub const LIGHTBOX_MAX_WIDTH: f32 = 1200.0;
    pub const LIGHTBOX_MAX_HEIGHT: f32 = 800.0;

    /// Width of the keyboard focus ring.
    pub const FOCUS_RING: f32 = 3.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    pub const TITLE_LG: f32 = 26.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::FADED > 0.0 && opacity::FADED < 1.0);
    assert!(opacity::BACKDROP > opacity::OVERLAY_MEDIUM);

    assert!(sizing::THUMBNAIL_WIDTH > sizing::THUMBNAIL_HEIGHT);
    assert!(sizing::LIGHTBOX_MAX_WIDTH > sizing::THUMBNAIL_WIDTH);

    assert!(typography::TITLE_LG > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);
};
