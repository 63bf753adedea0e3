//! Navigation Panel
//! Left side panel with the branding logo and page selection.

use crate::gui::views::Page;
use anyhow::Context;
use egui::{Color32, RichText, TextureHandle};
use log::warn;
use std::path::Path;

const LOGO_CANDIDATES: [&str; 2] = ["logo.png", "logo.jpg"];

/// Side panel: best-effort logo plus the page radio group.
pub struct NavPanel {
    logo: Option<TextureHandle>,
}

impl NavPanel {
    /// The logo is loaded once at startup. A missing or unreadable file is
    /// never fatal; the panel shows a placeholder instead.
    pub fn new(ctx: &egui::Context, data_dir: &Path) -> Self {
        let logo = match load_logo(ctx, data_dir) {
            Ok(logo) => logo,
            Err(e) => {
                warn!("branding logo unavailable: {:#}", e);
                None
            }
        };
        if logo.is_none() {
            warn!("no logo file in {}", data_dir.display());
        }
        Self { logo }
    }

    pub fn show(&self, ui: &mut egui::Ui, page: &mut Page) {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            match &self.logo {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).max_width(150.0));
                }
                None => {
                    ui.label(
                        RichText::new("Logo file not found")
                            .size(11.0)
                            .color(Color32::from_rgb(243, 156, 18)),
                    );
                }
            }
            ui.add_space(6.0);
            ui.label(
                RichText::new("Decision Intelligence")
                    .size(18.0)
                    .strong()
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Revenue Growth & Risk Management")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(8.0);

        ui.label(RichText::new("Navigation").size(14.0).strong());
        ui.add_space(4.0);
        for candidate in Page::ALL {
            ui.radio_value(page, candidate, candidate.title());
        }
    }
}

fn load_logo(ctx: &egui::Context, data_dir: &Path) -> anyhow::Result<Option<TextureHandle>> {
    for name in LOGO_CANDIDATES {
        let path = data_dir.join(name);
        if !path.is_file() {
            continue;
        }

        let image = image::open(&path)
            .with_context(|| format!("decoding {}", path.display()))?
            .to_rgba8();
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        return Ok(Some(ctx.load_texture("logo", color_image, Default::default())));
    }
    Ok(None)
}
