use fanmenu::{IconSize, MenuItem, MenuSpec};
use gdk_pixbuf::Pixbuf;
use std::path::{Path, PathBuf};

pub const PLACEHOLDER_SIZE: f64 = 96.0;
pub const PLACEHOLDER_COUNT: usize = 5;

/// Decoded icons and the menu built from their sizes. Entries whose bitmap
/// could not be read keep a placeholder-sized slot so indices stay stable.
#[derive(Clone, Default)]
pub struct IconSet {
    menu: MenuSpec,
    pixbufs: Vec<Option<Pixbuf>>,
}

impl IconSet {
    pub fn load(paths: &[PathBuf]) -> Self {
        if paths.is_empty() {
            return Self::placeholders(PLACEHOLDER_COUNT);
        }

        let (items, pixbufs): (Vec<_>, Vec<_>) = paths
            .iter()
            .map(|path| {
                let pixbuf = Self::load_icon(path);
                let size = pixbuf.as_ref().map_or(IconSize::square(PLACEHOLDER_SIZE), |p| {
                    IconSize::new(f64::from(p.width()), f64::from(p.height()))
                });
                (MenuItem::new(path.display().to_string(), size), pixbuf)
            })
            .unzip();

        Self {
            menu: MenuSpec::new(items),
            pixbufs,
        }
    }

    pub fn placeholders(count: usize) -> Self {
        Self {
            menu: MenuSpec::uniform(count, PLACEHOLDER_SIZE),
            pixbufs: vec![None; count],
        }
    }

    fn load_icon(path: &Path) -> Option<Pixbuf> {
        Pixbuf::from_file(path)
            .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
            .ok()
    }

    pub fn menu(&self) -> &MenuSpec {
        &self.menu
    }

    pub fn pixbuf(&self, index: usize) -> Option<&Pixbuf> {
        self.pixbufs.get(index).and_then(Option::as_ref)
    }

    pub fn size(&self, index: usize) -> IconSize {
        self.menu
            .get(index)
            .map_or(IconSize::square(PLACEHOLDER_SIZE), |item| item.size)
    }
}
