//! Custom-order request form.
//!
//! Submissions are validated and logged. They are not stored anywhere yet,
//! and the optional reference image is discarded after validation.

use tudobacana_core::Email;

const MIN_NAME_CHARS: usize = 2;
const MIN_WHATSAPP_CHARS: usize = 8;
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Metadata of an uploaded reference picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// Raw form fields, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomOrderForm {
    pub nome: String,
    pub email: String,
    pub whatsapp: String,
    pub descricao: String,
    pub preferencias: String,
    pub referencia: Option<ReferenceImage>,
}

/// Per-field validation messages shown next to the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomOrderErrors {
    pub nome: Option<&'static str>,
    pub email: Option<&'static str>,
    pub whatsapp: Option<&'static str>,
    pub descricao: Option<&'static str>,
    pub referencia: Option<&'static str>,
}

impl CustomOrderErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.email.is_none()
            && self.whatsapp.is_none()
            && self.descricao.is_none()
            && self.referencia.is_none()
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomOrderRequest {
    pub name: String,
    pub email: Email,
    pub whatsapp: Option<String>,
    pub description: String,
    pub preferences: Option<String>,
    pub reference: Option<ReferenceImage>,
}

impl CustomOrderForm {
    /// Check every field and collect all messages at once.
    ///
    /// # Errors
    ///
    /// Returns [`CustomOrderErrors`] listing each field that failed.
    pub fn validate(&self) -> Result<CustomOrderRequest, CustomOrderErrors> {
        let mut errors = CustomOrderErrors::default();

        let name = self.nome.trim();
        if name.chars().count() < MIN_NAME_CHARS {
            errors.nome = Some("Informe seu nome");
        }

        let email = Email::parse(&self.email);
        if email.is_err() {
            errors.email = Some("E-mail inválido");
        }

        let whatsapp = self.whatsapp.trim();
        if !whatsapp.is_empty() && whatsapp.chars().count() < MIN_WHATSAPP_CHARS {
            errors.whatsapp = Some("Informe um telefone válido");
        }

        let description = self.descricao.trim();
        if description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.descricao = Some("Descreva seu pedido com pelo menos 10 caracteres");
        }

        let not_an_image = self
            .referencia
            .as_ref()
            .is_some_and(|reference| !reference.content_type.starts_with("image/"));
        if not_an_image {
            errors.referencia = Some("A referência deve ser uma imagem");
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(CustomOrderRequest {
                name: name.to_string(),
                email,
                whatsapp: (!whatsapp.is_empty()).then(|| whatsapp.to_string()),
                description: description.to_string(),
                preferences: Some(self.preferencias.trim())
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
                reference: self.referencia.clone(),
            }),
            _ => Err(errors),
        }
    }
}
