use anyhow::{Context as _, Result};
use storefront_core::PageModel;
use tera::{Context, Tera};

const PAGE_TEMPLATE_NAME: &str = "products.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>All Products</title>
</head>
<body>
  <h1>All Products</h1>
  <form class="filters" method="get">
    <input type="text" name="search" placeholder="Search by name" value="{{ search_term }}">
    <select name="category">
      <option value=""{% if selected_category == "" %} selected{% endif %}>Select Category</option>
      {% for option in category_options %}
      <option value="{{ option }}"{% if option == selected_category %} selected{% endif %}>{{ option }}</option>
      {% endfor %}
    </select>
  </form>
  {% if notice %}<p class="notice">{{ notice }}</p>{% endif %}
  {% if status == "loaded" %}
  <div class="grid">
    {% for card in cards %}
    <div class="card">
      <img src="{{ card.image }}" alt="{{ card.title }}">
      <h3>{{ card.title }}</h3>
      <p>{{ card.description }}</p>
      <div class="prices">
        {% if card.original_price %}<del>{{ card.original_price }}</del>{% endif %}
        <strong>{{ card.price }}</strong>
      </div>
      {% if card.badge %}<div class="badge">{{ card.badge }}</div>{% endif %}
      <a href="{{ card.detail_href }}">Go to Product</a>
    </div>
    {% endfor %}
  </div>
  {% endif %}
</body>
</html>
"#;

pub fn render(page: &PageModel) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
        .context("failed to register page template")?;

    let context = Context::from_serialize(page).context("failed to build template context")?;
    tera.render(PAGE_TEMPLATE_NAME, &context).context("failed to render page template")
}
