use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Opaque icon reference; the host decides how to resolve it.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconId(String);

impl IconId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IconSize {
    pub width: f64,
    pub height: f64,
}

impl IconSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn radius(&self) -> f64 {
        self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: IconId,
    pub size: IconSize,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, size: IconSize) -> Self {
        Self {
            id: IconId::new(id),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuSpec {
    items: Vec<MenuItem>,
}

impl MenuSpec {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// `count` identical square icons, handy for demos and tests.
    pub fn uniform(count: usize, side: f64) -> Self {
        Self::new(
            (0..count)
                .map(|i| MenuItem::new(format!("item-{i}"), IconSize::square(side)))
                .collect(),
        )
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn icon_radii(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.size.radius()).collect()
    }

    pub fn first_radius(&self) -> Option<f64> {
        self.items.first().map(|item| item.size.radius())
    }

    pub fn last_radius(&self) -> Option<f64> {
        self.items.last().map(|item| item.size.radius())
    }
}

impl FromIterator<MenuItem> for MenuSpec {
    fn from_iter<T: IntoIterator<Item = MenuItem>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
