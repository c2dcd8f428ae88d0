use rand::Rng;

/// First category in the data set always gets this color, second the next;
/// both match what the dashboard frontend styles its primary series with.
pub const PRIMARY_COLOR: &str = "#ff7f0e";
pub const SECONDARY_COLOR: &str = "#1f77b4";

/// Category-to-color map built fresh for each aggregation call.
///
/// The first two categories (in first-seen order) get the fixed palette
/// above; every later category draws a uniform random 24-bit color. The map
/// is threaded through all three projections so a category renders with one
/// color per response, but repeated requests may recolor the 3rd+ category.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    entries: Vec<(String, String)>,
}

impl CategoryColors {
    pub fn assign(categories: &[String]) -> CategoryColors {
        let mut rng = rand::thread_rng();
        let entries = categories
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let color = match index {
                    0 => PRIMARY_COLOR.to_string(),
                    1 => SECONDARY_COLOR.to_string(),
                    _ => random_color(&mut rng),
                };
                (category.clone(), color)
            })
            .collect();
        CategoryColors { entries }
    }

    /// Color for a category seen during assignment. Unknown categories fall
    /// back to the primary color; the aggregator only asks about categories
    /// it collected itself, so the fallback is never hit in practice.
    pub fn color(&self, category: &str) -> &str {
        self.entries
            .iter()
            .find(|(label, _)| label == category)
            .map(|(_, color)| color.as_str())
            .unwrap_or(PRIMARY_COLOR)
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

fn random_color(rng: &mut impl Rng) -> String {
    format!("#{:06X}", rng.gen_range(0u32..0x100_0000))
}
