//! Products tab: listing, create/edit form and HTMX delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use tudobacana_core::{
    Category, CategoryChoice, CategoryError, PriceError, Product, ProductDraft, ProductDraftError,
    ProductId, ProductInput,
};

use super::PanelChrome;
use crate::db::RepositoryError;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::{Notice, push_flash};
use crate::services::panel::{
    DELETE_FAILED, LOAD_PRODUCTS_FAILED, PRODUCT_DELETED, PRODUCT_NOT_FOUND, SAVE_FAILED,
};
use crate::services::{DeleteOutcome, PanelService, SaveTarget};
use crate::state::AppState;

/// Products tab path, also the landing page after login.
pub const INDEX_PATH: &str = "/produtos";

/// Options of the category select, in display order.
pub const CATEGORY_OPTIONS: [&str; 6] = [
    Category::SUGGESTIONS[0],
    Category::SUGGESTIONS[1],
    Category::SUGGESTIONS[2],
    Category::SUGGESTIONS[3],
    Category::SUGGESTIONS[4],
    Category::OTHER,
];

// =============================================================================
// Views
// =============================================================================

/// Product row for the table.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub active: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            price: product.price.to_string(),
            category: product.category.to_string(),
            image_url: product.image_url.filter(|url| !url.is_empty()),
            name: product.name,
            description: product.description,
            active: product.active,
        }
    }
}

fn views(products: Vec<Product>) -> Vec<ProductView> {
    products.into_iter().map(ProductView::from).collect()
}

/// Submitted product form. Field names match the HTML inputs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub custom_category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    /// Checkbox: present (any value) when checked.
    #[serde(default)]
    pub active: Option<String>,
}

impl ProductForm {
    /// Empty form for a new product, published by default.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            active: Some("on".to_string()),
            ..Self::default()
        }
    }

    /// Pre-fill the form from a stored product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let choice = CategoryChoice::from_stored(&product.category);
        Self {
            name: product.name.clone(),
            price: format!("{:.2}", product.price.amount()),
            category: choice.select,
            custom_category: choice.custom,
            image_url: product.image_url.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            active: product.active.then(|| "on".to_string()),
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn is_other(&self) -> bool {
        self.category == Category::OTHER
    }

    #[must_use]
    pub fn selected(&self, option: &str) -> bool {
        self.category == option
    }

    fn input(&self) -> ProductInput<'_> {
        ProductInput {
            name: &self.name,
            price: &self.price,
            category: &self.category,
            custom_category: &self.custom_category,
            image_url: &self.image_url,
            description: &self.description,
            active: self.is_active(),
        }
    }
}

/// Form-level message for a rejected draft.
const fn draft_error_message(error: &ProductDraftError) -> &'static str {
    match error {
        ProductDraftError::EmptyName => "Informe o nome do produto",
        ProductDraftError::Price(PriceError::Empty) => "Informe o preço",
        ProductDraftError::Price(PriceError::Invalid(_)) => "Preço inválido",
        ProductDraftError::Price(PriceError::Negative) => "O preço não pode ser negativo",
        ProductDraftError::Category(CategoryError::Empty) => "Selecione uma categoria",
        ProductDraftError::Category(CategoryError::MissingCustom) => {
            "Informe o nome da categoria"
        }
        ProductDraftError::Category(CategoryError::UnknownOption(_)) => "Categoria inválida",
        ProductDraftError::ImageUrl => "URL da imagem inválida",
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Products tab.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub chrome: PanelChrome,
    pub products: Vec<ProductView>,
}

/// Create or edit form.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub chrome: PanelChrome,
    pub title: &'static str,
    pub action: String,
    pub form: ProductForm,
    pub form_error: Option<&'static str>,
    pub categories: [&'static str; 6],
}

/// Table fragment plus out-of-band toasts, returned after a delete.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_deleted.html")]
pub struct ProductDeletedTemplate {
    pub products: Vec<ProductView>,
    pub notices: Vec<Notice>,
}

/// Out-of-band toasts only.
#[derive(Template, WebTemplate)]
#[template(path = "partials/toasts.html")]
pub struct ToastsTemplate {
    pub notices: Vec<Notice>,
}

impl ProductFormTemplate {
    fn new(chrome: PanelChrome, target: SaveTarget, form: ProductForm) -> Self {
        let (title, action) = match target {
            SaveTarget::Create => ("Novo Produto", INDEX_PATH.to_string()),
            SaveTarget::Update(id) => ("Editar Produto", format!("{INDEX_PATH}/{id}")),
        };
        Self {
            chrome,
            title,
            action,
            form,
            form_error: None,
            categories: CATEGORY_OPTIONS,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Products tab.
///
/// GET /produtos
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let store = state.catalog_store();
    let listing = PanelService::new(&store, state.listings()).load().await;
    let chrome = PanelChrome::new(&state, &session, &admin, INDEX_PATH, listing.notices).await;

    ProductsIndexTemplate {
        chrome,
        products: views(listing.products),
    }
}

/// Empty product form.
///
/// GET /produtos/novo
#[instrument(skip(admin, state, session))]
pub async fn new_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let chrome = PanelChrome::new(&state, &session, &admin, INDEX_PATH, Vec::new()).await;
    ProductFormTemplate::new(chrome, SaveTarget::Create, ProductForm::blank())
}

/// Pre-filled edit form.
///
/// GET /produtos/{id}/editar
///
/// # Errors
///
/// Returns `AppError::Session` if a flash message cannot be stored.
#[instrument(skip(admin, state, session))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Response> {
    let store = state.catalog_store();
    let panel = PanelService::new(&store, state.listings());

    let product = match panel.product(id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            push_flash(&session, Notice::error(PRODUCT_NOT_FOUND)).await?;
            return Ok(Redirect::to(INDEX_PATH).into_response());
        }
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "Failed to load product for editing");
            push_flash(&session, Notice::error(LOAD_PRODUCTS_FAILED)).await?;
            return Ok(Redirect::to(INDEX_PATH).into_response());
        }
    };

    let chrome = PanelChrome::new(&state, &session, &admin, INDEX_PATH, Vec::new()).await;
    Ok(ProductFormTemplate::new(
        chrome,
        SaveTarget::Update(id),
        ProductForm::from_product(&product),
    )
    .into_response())
}

/// Insert a product.
///
/// POST /produtos
///
/// # Errors
///
/// Returns `AppError::Session` if a flash message cannot be stored.
#[instrument(skip(admin, state, session, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    save(&state, &session, &admin, SaveTarget::Create, form).await
}

/// Update a product.
///
/// POST /produtos/{id}
///
/// # Errors
///
/// Returns `AppError::Session` if a flash message cannot be stored.
#[instrument(skip(admin, state, session, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    save(&state, &session, &admin, SaveTarget::Update(id), form).await
}

/// Validate, save, then redirect to the list so it is read again.
///
/// Invalid input re-renders the form (422). A failed write re-renders it
/// with the entered values and an error toast.
async fn save(
    state: &AppState,
    session: &Session,
    admin: &crate::models::CurrentAdmin,
    target: SaveTarget,
    form: ProductForm,
) -> Result<Response> {
    let draft = match ProductDraft::parse(&form.input()) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "Product form rejected");
            let chrome = PanelChrome::new(state, session, admin, INDEX_PATH, Vec::new()).await;
            let mut page = ProductFormTemplate::new(chrome, target, form);
            page.form_error = Some(draft_error_message(&e));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let store = state.catalog_store();
    match PanelService::new(&store, state.listings())
        .save(target, &draft)
        .await
    {
        Ok(_) => {
            push_flash(session, Notice::success(target.success_message())).await?;
            Ok(Redirect::to(INDEX_PATH).into_response())
        }
        Err(RepositoryError::NotFound) => {
            push_flash(session, Notice::error(PRODUCT_NOT_FOUND)).await?;
            Ok(Redirect::to(INDEX_PATH).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save product");
            let notices = vec![Notice::error(SAVE_FAILED)];
            let chrome = PanelChrome::new(state, session, admin, INDEX_PATH, notices).await;
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                ProductFormTemplate::new(chrome, target, form),
            )
                .into_response())
        }
    }
}

/// Body of the delete request. The button only sends it after `hx-confirm`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub confirmar: String,
}

/// Delete a product (HTMX).
///
/// POST /produtos/{id}/excluir
///
/// Without `confirmar=sim` nothing happens (204). A confirmed delete answers
/// with the re-read table and a toast.
#[instrument(skip(_admin, state, form))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    form: std::result::Result<Form<DeleteForm>, FormRejection>,
) -> Response {
    let confirmed = form.is_ok_and(|Form(form)| form.confirmar == "sim");

    let store = state.catalog_store();
    match PanelService::new(&store, state.listings())
        .delete(id, confirmed)
        .await
    {
        Ok(DeleteOutcome::Cancelled) => StatusCode::NO_CONTENT.into_response(),
        Ok(DeleteOutcome::Deleted { products, notice }) => {
            let notices = std::iter::once(Notice::success(PRODUCT_DELETED))
                .chain(notice)
                .collect();
            ProductDeletedTemplate {
                products: views(products),
                notices,
            }
            .into_response()
        }
        Err(RepositoryError::NotFound) => toast_only(Notice::error(PRODUCT_NOT_FOUND)),
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "Failed to delete product");
            toast_only(Notice::error(DELETE_FAILED))
        }
    }
}

/// Leave the table as it is and only show a toast.
fn toast_only(notice: Notice) -> Response {
    (
        [("HX-Reswap", "none")],
        ToastsTemplate {
            notices: vec![notice],
        },
    )
        .into_response()
}
