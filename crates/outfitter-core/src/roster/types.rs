use crate::sizing::{ItemCategory, Size, SockSize};
use serde::{Deserialize, Serialize};

/// One attendee's row from the gear roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Position in the roster after blank rows were dropped
    pub index: usize,
    pub reservation: u64,
    pub name: String,
    pub address: String,
    pub country: String,
    pub sex: String,
    pub sizes: GearSizes,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub gear_ordered: Option<String>,
}

/// Per-category selections. `None` means no item of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSizes {
    pub shirt: Option<Size>,
    pub shorts: Option<Size>,
    pub jersey: Option<Size>,
    pub racerback: Option<Size>,
    pub socks: bool,
}

/// A single item to put in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub category: ItemCategory,
    pub page_key: String,
    pub size_code: String,
}

impl GuestRecord {
    /// Size the socks are derived from: shirt, then jersey, then racerback
    pub fn sock_reference_size(&self) -> Option<Size> {
        self.sizes
            .shirt
            .or(self.sizes.jersey)
            .or(self.sizes.racerback)
    }

    /// Items to add for this guest, in cart order
    pub fn cart_lines(&self) -> Vec<CartLine> {
        let mut lines = Vec::new();

        for category in ItemCategory::ALL {
            let size_code = match category {
                ItemCategory::Shirt => self.sizes.shirt.map(|s| s.guest_shirt_code()),
                ItemCategory::Shorts => self.sizes.shorts.map(|s| s.site_code()),
                ItemCategory::Jersey => self.sizes.jersey.map(|s| s.site_code()),
                ItemCategory::Racerback => self.sizes.racerback.map(|s| s.site_code()),
                ItemCategory::Socks => self
                    .sizes
                    .socks
                    .then(|| SockSize::from_reference(self.sock_reference_size()).site_code()),
            };

            if let Some(size_code) = size_code {
                lines.push(CartLine {
                    category,
                    page_key: category.page_key(&self.sex),
                    size_code: size_code.to_string(),
                });
            }
        }

        lines
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn last_name(&self) -> &str {
        self.name.split_whitespace().last().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(sizes: GearSizes) -> GuestRecord {
        GuestRecord {
            index: 0,
            reservation: 1001,
            name: "Jane Doe".to_string(),
            address: "1 Main St".to_string(),
            country: "USA".to_string(),
            sex: "Women".to_string(),
            sizes,
            notes: None,
            gear_ordered: None,
        }
    }

    #[test]
    fn test_cart_lines_in_category_order() {
        let g = guest(GearSizes {
            shirt: Some(Size::XxLarge),
            shorts: Some(Size::XxLarge),
            jersey: None,
            racerback: Some(Size::Medium),
            socks: true,
        });

        let lines = g.cart_lines();
        let summary: Vec<_> = lines
            .iter()
            .map(|l| (l.page_key.as_str(), l.size_code.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Women Shirt", "2XL"),
                ("Women Short", "2X"),
                ("Racerback", "MD"),
                ("Socks", "LG/XL"),
            ]
        );
    }

    #[test]
    fn test_socks_follow_shirt_size() {
        let g = guest(GearSizes {
            shirt: Some(Size::Small),
            socks: true,
            ..Default::default()
        });

        let socks = g.cart_lines().pop().unwrap();
        assert_eq!(socks.category, ItemCategory::Socks);
        assert_eq!(socks.size_code, "SM/MD");
    }

    #[test]
    fn test_socks_follow_jersey_when_no_shirt() {
        let g = guest(GearSizes {
            jersey: Some(Size::XLarge),
            socks: true,
            ..Default::default()
        });

        let socks = g.cart_lines().pop().unwrap();
        assert_eq!(socks.size_code, "LG/XL");
    }

    #[test]
    fn test_no_items() {
        let g = guest(GearSizes::default());
        assert!(g.cart_lines().is_empty());
    }

    #[test]
    fn test_name_parts() {
        let mut g = guest(GearSizes::default());
        g.name = "Mary Ann  van Smith".to_string();
        assert_eq!(g.first_name(), "Mary");
        assert_eq!(g.last_name(), "Smith");
    }
}
