//! Custom-order request page.
//!
//! The form is validated server-side and the accepted request is only
//! logged. Nothing is persisted and uploaded reference images are dropped.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use super::PageChrome;
use crate::error::Result;
use crate::filters;
use crate::models::{CustomOrderErrors, CustomOrderForm, ReferenceImage};
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "custom_order.html")]
pub struct CustomOrderTemplate {
    pub chrome: PageChrome,
    pub form: CustomOrderForm,
    pub errors: CustomOrderErrors,
    pub sent: bool,
}

/// Display the custom-order form.
///
/// GET /personalizados
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CustomOrderTemplate {
        chrome: PageChrome::from_config(state.config()),
        form: CustomOrderForm::default(),
        errors: CustomOrderErrors::default(),
        sent: false,
    }
}

/// Validate a custom-order request.
///
/// POST /personalizados
///
/// Invalid input re-renders the form with messages (422). Valid input is
/// logged and answered with a confirmation and an empty form.
///
/// # Errors
///
/// Returns `AppError::Upload` if the multipart body cannot be read.
#[instrument(skip(state, multipart))]
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let chrome = PageChrome::from_config(state.config());

    match form.validate() {
        Ok(request) => {
            tracing::info!(
                name = %request.name,
                email = %request.email,
                whatsapp = request.whatsapp.as_deref().unwrap_or(""),
                description = %request.description,
                preferences = request.preferences.as_deref().unwrap_or(""),
                reference_file = request.reference.as_ref().map_or("", |r| r.file_name.as_str()),
                reference_bytes = request.reference.as_ref().map_or(0, |r| r.size),
                "Custom order request received"
            );

            Ok((
                StatusCode::OK,
                CustomOrderTemplate {
                    chrome,
                    form: CustomOrderForm::default(),
                    errors: CustomOrderErrors::default(),
                    sent: true,
                },
            ))
        }
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            CustomOrderTemplate {
                chrome,
                form,
                errors,
                sent: false,
            },
        )),
    }
}

/// Collect the known form fields. Unknown fields are ignored.
async fn read_form(mut multipart: Multipart) -> Result<CustomOrderForm> {
    let mut form = CustomOrderForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "nome" => form.nome = field.text().await?,
            "email" => form.email = field.text().await?,
            "whatsapp" => form.whatsapp = field.text().await?,
            "descricao" => form.descricao = field.text().await?,
            "preferencias" => form.preferencias = field.text().await?,
            "referencia" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                // Browsers send an empty part when no file was picked.
                if !file_name.is_empty() || !data.is_empty() {
                    form.referencia = Some(ReferenceImage {
                        file_name,
                        content_type,
                        size: data.len(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::routes::test_support::{app, body_text};

    const BOUNDARY: &str = "tudobacana-boundary";

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content_type, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"referencia\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn submit(body: Vec<u8>) -> Request<Body> {
        Request::post("/personalizados")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_show_renders_form() {
        let response = app()
            .oneshot(Request::get("/personalizados").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Pedidos Personalizados | tudobacana"));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
    }

    #[tokio::test]
    async fn test_valid_submission_confirms_and_clears_form() {
        let body = multipart_body(
            &[
                ("nome", "Joana"),
                ("email", "joana@example.com"),
                ("whatsapp", ""),
                ("descricao", "Um vaso alto com esmalte verde"),
                ("preferencias", "tons terrosos"),
            ],
            Some(("vaso.png", "image/png", b"\x89PNG")),
        );
        let response = app().oneshot(submit(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Solicitação enviada"));
        assert!(!html.contains("Um vaso alto com esmalte verde"));
    }

    #[tokio::test]
    async fn test_invalid_submission_keeps_values_and_shows_messages() {
        let body = multipart_body(
            &[
                ("nome", "Joana"),
                ("email", "joana"),
                ("descricao", "curto"),
            ],
            None,
        );
        let response = app().oneshot(submit(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("E-mail inválido"));
        assert!(html.contains("Descreva seu pedido com pelo menos 10 caracteres"));
        assert!(!html.contains("Informe seu nome"));
        assert!(html.contains(r#"value="Joana""#));
        assert!(!html.contains("Solicitação enviada"));
    }
}
