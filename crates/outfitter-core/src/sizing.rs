//! Garment sizes and the translation between the roster's size vocabulary
//! and the codes the storefront expects.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A garment size as recorded on the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XxLarge,
    XxxLarge,
}

impl Size {
    pub const ALL: [Size; 7] = [
        Size::XSmall,
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::XLarge,
        Size::XxLarge,
        Size::XxxLarge,
    ];

    /// Name used in the roster spreadsheet (e.g. "XX-Large")
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Size::XSmall => "X-Small",
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::XLarge => "X-Large",
            Size::XxLarge => "XX-Large",
            Size::XxxLarge => "XXX-Large",
        }
    }

    /// Size code used on jersey, shorts and racerback product pages
    pub fn site_code(&self) -> &'static str {
        match self {
            Size::XSmall => "XS",
            Size::Small => "SM",
            Size::Medium => "MD",
            Size::Large => "LG",
            Size::XLarge => "XL",
            Size::XxLarge => "2X",
            Size::XxxLarge => "3X",
        }
    }

    /// Size code used on guest shirt pages, which spell the largest sizes differently
    pub fn guest_shirt_code(&self) -> &'static str {
        match self {
            Size::XxLarge => "2XL",
            Size::XxxLarge => "3XL",
            other => other.site_code(),
        }
    }

    /// Parse a roster size name such as "X-Large"
    pub fn from_sheet_name(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.sheet_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownSize(name.to_string()))
    }

    /// Parse a sized-item cell like "Mens XX-Large".
    ///
    /// Cells starting with 'D' ("Do not send ...") mean the guest gets no
    /// item, as do blank cells. Otherwise the second word is the size name.
    pub fn from_item_cell(cell: &str) -> Result<Option<Self>> {
        let cell = cell.trim();
        if cell.is_empty() || cell.starts_with('D') {
            return Ok(None);
        }

        let name = cell
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| Error::UnknownSize(cell.to_string()))?;

        Self::from_sheet_name(name).map(Some)
    }

    fn is_small_or_medium(&self) -> bool {
        matches!(self, Size::XSmall | Size::Small | Size::Medium)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.site_code())
    }
}

impl FromStr for Size {
    type Err = Error;

    /// Accepts either a site code ("2X") or a roster size name ("XX-Large")
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.site_code().eq_ignore_ascii_case(trimmed))
            .map(Ok)
            .unwrap_or_else(|| Self::from_sheet_name(trimmed))
    }
}

/// Sock sizes only come in two buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SockSize {
    SmallMedium,
    LargeXLarge,
}

impl SockSize {
    pub fn site_code(&self) -> &'static str {
        match self {
            SockSize::SmallMedium => "SM/MD",
            SockSize::LargeXLarge => "LG/XL",
        }
    }

    /// Derive the sock bucket from the first garment size that is present.
    ///
    /// With no reference size at all the larger bucket is used.
    pub fn from_reference(size: Option<Size>) -> Self {
        match size {
            Some(size) if size.is_small_or_medium() => SockSize::SmallMedium,
            _ => SockSize::LargeXLarge,
        }
    }
}

/// Item categories in the order they are added to the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Shirt,
    Shorts,
    Jersey,
    Racerback,
    Socks,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 5] = [
        ItemCategory::Shirt,
        ItemCategory::Shorts,
        ItemCategory::Jersey,
        ItemCategory::Racerback,
        ItemCategory::Socks,
    ];

    /// Roster column holding this category's selection
    pub fn column(&self) -> &'static str {
        match self {
            ItemCategory::Shirt => "T-Shirt",
            ItemCategory::Shorts => "Shorts",
            ItemCategory::Jersey => "Sport Cut Jersey",
            ItemCategory::Racerback => "Womens Racerback Jersey",
            ItemCategory::Socks => "Socks",
        }
    }

    /// Key into the configured product pages. Shirts, shorts and jerseys
    /// have a page per sex.
    pub fn page_key(&self, sex: &str) -> String {
        match self {
            ItemCategory::Shirt => format!("{} Shirt", sex),
            ItemCategory::Shorts => format!("{} Short", sex),
            ItemCategory::Jersey => format!("{} Prisma", sex),
            ItemCategory::Racerback => "Racerback".to_string(),
            ItemCategory::Socks => "Socks".to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Shirt => "shirt",
            ItemCategory::Shorts => "shorts",
            ItemCategory::Jersey => "jersey",
            ItemCategory::Racerback => "racerback",
            ItemCategory::Socks => "socks",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
