//! Cart page renderer.

use airtech_commerce::cart::{Cart, CartPricing, LineItem, PricingRules};
use airtech_commerce::CommerceError;

use crate::badge::HIDDEN_CLASS;
use crate::command::ACTION_ATTRIBUTE;
use crate::config::Labels;
use crate::dom::Document;
use crate::format::{count_with_word, html_escape};

/// Element ids on the cart page.
pub mod ids {
    pub const CART_ITEMS: &str = "cart-items";
    pub const EMPTY_CART: &str = "empty-cart";
    pub const TOTAL_ITEMS: &str = "total-items";
    pub const SUBTOTAL: &str = "subtotal";
    pub const SERVICES_TOTAL: &str = "services-total";
    pub const DELIVERY_COST: &str = "delivery-cost";
    pub const TOTAL_PRICE: &str = "total-price";
    pub const CHECKOUT_BUTTON: &str = "checkout-button";
}

/// Render one cart row.
pub fn render_row(item: &LineItem, labels: &Labels) -> String {
    let id = html_escape(item.id.as_str());
    let name = html_escape(&item.name);
    let line_total = item
        .total()
        .unwrap_or_else(|| item.unit_price.saturating_multiply(item.quantity));

    format!(
        r#"<div class="cart-item bg-gray-50 rounded-xl p-4" data-id="{id}">
    <div class="flex items-center">
        <img src="{image}" alt="{name}" class="w-20 h-20 object-cover rounded-lg mr-4">
        <div class="flex-1">
            <h4 class="font-bold text-gray-900">{name}</h4>
            <p class="text-gray-600 text-sm">{unit_price} {per_unit}</p>
            <div class="flex items-center justify-between mt-2">
                <div class="flex items-center">
                    <button type="button" {action}="decrease" data-id="{id}" class="w-8 h-8 flex items-center justify-center border rounded-lg hover:bg-gray-100">
                        <i class="fas fa-minus text-sm"></i>
                    </button>
                    <span class="mx-3 font-semibold">{quantity}</span>
                    <button type="button" {action}="increase" data-id="{id}" class="w-8 h-8 flex items-center justify-center border rounded-lg hover:bg-gray-100">
                        <i class="fas fa-plus text-sm"></i>
                    </button>
                </div>
                <div class="text-right">
                    <p class="font-bold text-gray-900">{line_total}</p>
                    <button type="button" {action}="remove" data-id="{id}" class="text-red-600 hover:text-red-800 text-sm mt-1">
                        <i class="fas fa-trash mr-1"></i>{remove}
                    </button>
                </div>
            </div>
        </div>
    </div>
</div>"#,
        id = id,
        name = name,
        image = html_escape(&item.image_url),
        unit_price = item.unit_price.display(),
        per_unit = html_escape(&labels.per_unit),
        action = ACTION_ATTRIBUTE,
        quantity = item.quantity,
        line_total = line_total.display(),
        remove = html_escape(&labels.remove),
    )
}

/// Render every row of the cart, in cart order.
pub fn render_rows(cart: &Cart, labels: &Labels) -> String {
    cart.items()
        .iter()
        .map(|item| render_row(item, labels))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ids of the add-ons whose checkbox is present and checked.
pub fn selected_add_ons<D: Document>(document: &D, rules: &PricingRules) -> Vec<String> {
    rules
        .add_ons
        .iter()
        .filter(|add_on| {
            document
                .element_by_id(&add_on.id)
                .map(|checkbox| document.is_checked(&checkbox))
                .unwrap_or(false)
        })
        .map(|add_on| add_on.id.clone())
        .collect()
}

/// Paint the cart page.
///
/// Returns `Ok(false)` when the page has no `#cart-items` container. Each
/// other element is optional and skipped when absent. On a pricing error
/// the rows and item count are still painted before the error is returned.
pub fn render_cart_page<D: Document>(
    document: &D,
    cart: &Cart,
    rules: &PricingRules,
    labels: &Labels,
) -> Result<bool, CommerceError> {
    let Some(container) = document.element_by_id(ids::CART_ITEMS) else {
        return Ok(false);
    };
    let set_text = |id: &str, text: &str| {
        if let Some(element) = document.element_by_id(id) {
            document.set_text(&element, text);
        }
    };
    let empty_cart = document.element_by_id(ids::EMPTY_CART);
    let checkout = document.element_by_id(ids::CHECKOUT_BUTTON);

    if cart.is_empty() {
        document.set_inner_html(&container, "");
        if let Some(element) = &empty_cart {
            document.remove_class(element, HIDDEN_CLASS);
        }
        set_text(ids::TOTAL_ITEMS, &count_with_word(0, &labels.item_forms));
        write_totals(&set_text, &CartPricing::empty(cart.currency()));
        if let Some(button) = &checkout {
            document.set_disabled(button, true);
        }
        return Ok(true);
    }

    if let Some(element) = &empty_cart {
        document.add_class(element, HIDDEN_CLASS);
    }
    set_text(
        ids::TOTAL_ITEMS,
        &count_with_word(cart.total_item_count(), &labels.item_forms),
    );
    document.set_inner_html(&container, &render_rows(cart, labels));

    let selected = selected_add_ons(document, rules);
    let pricing = cart.calculate_pricing(rules, &selected)?;
    write_totals(&set_text, &pricing);

    if let Some(button) = &checkout {
        document.set_disabled(button, false);
    }
    Ok(true)
}

fn write_totals(set_text: &impl Fn(&str, &str), pricing: &CartPricing) {
    set_text(ids::SUBTOTAL, &pricing.subtotal.display());
    set_text(ids::SERVICES_TOTAL, &pricing.add_ons_total.display());
    set_text(ids::DELIVERY_COST, &pricing.delivery_fee.display());
    set_text(ids::TOTAL_PRICE, &pricing.grand_total.display());
}
