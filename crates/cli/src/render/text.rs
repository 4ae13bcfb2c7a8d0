use storefront_core::{PageModel, PageStatus, ProductCard};

pub fn render(page: &PageModel) -> String {
    let mut lines = vec!["All Products".to_string()];
    lines.push(render_filters(page));

    if let Some(notice) = &page.notice {
        lines.push(String::new());
        lines.push(notice.clone());
    }

    if page.status == PageStatus::Loaded {
        for card in &page.cards {
            lines.push(String::new());
            lines.extend(render_card(card));
        }
    }

    lines.join("\n")
}

fn render_filters(page: &PageModel) -> String {
    let category = if page.selected_category.is_empty() {
        "any"
    } else {
        page.selected_category.as_str()
    };
    let summary = match page.status {
        PageStatus::Loaded => format!("{} of {} shown", page.visible, page.total),
        PageStatus::Loading => "loading".to_string(),
        PageStatus::Failed => "unavailable".to_string(),
    };
    format!(
        "search: \"{}\" | category: {category} [{}] | {summary}",
        page.search_term,
        page.category_options.join(", ")
    )
}

fn render_card(card: &ProductCard) -> Vec<String> {
    let mut heading = format!("#{:<4} {}", card.id, card.title);
    if let Some(badge) = &card.badge {
        heading.push_str(&format!("  [{badge}]"));
    }

    let price = match &card.original_price {
        Some(original) => format!("      ~~{original}~~ {}", card.price),
        None => format!("      {}", card.price),
    };

    vec![
        heading,
        price,
        format!("      {}", card.description),
        format!("      image: {}", card.image),
        format!("      details: {}", card.detail_href),
    ]
}
