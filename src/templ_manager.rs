use core::panic;
use std::sync::OnceLock;

use tera::{Context, Tera};
use tracing::info;

use crate::web::types::{Notice, PageState};

/// The welcome email rendered for one recipient.
#[derive(Debug)]
pub struct WelcomeEmail {
    pub html: String,
    pub text: String,
}

#[derive(Debug)]
pub struct TemplateManager {
    tera: &'static Tera,
}

impl TemplateManager {
    pub fn init() -> Self {
        info!("{:<20} - Initializing the Template manager", "templ manager");
        static TERA: OnceLock<Tera> = OnceLock::new();
        let tera = TERA.get_or_init(|| {
            Tera::new("templates/**/*").unwrap_or_else(|e| panic!("Parsing error(s): {e}"))
        });
        Self { tera }
    }

    /// Renders the landing page in the given state, optionally with a notice on top.
    pub fn render_home(
        &self,
        product_name: &str,
        page_state: PageState,
        notice: Option<&Notice>,
    ) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("product_name", product_name);
        ctx.insert("submitted", &(page_state == PageState::Submitted));
        ctx.insert("notice", &notice);

        self.tera.render("html/home.html", &ctx)
    }

    /// Renders the HTML and the plain text version of the welcome email.
    pub fn render_welcome_email(
        &self,
        product_name: &str,
        recipient: &str,
    ) -> Result<WelcomeEmail, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("product_name", product_name);
        ctx.insert("recipient", recipient);

        Ok(WelcomeEmail {
            html: self.tera.render("email/welcome.html", &ctx)?,
            text: self.tera.render("email/welcome.txt", &ctx)?,
        })
    }

    pub fn tera(&self) -> &Tera {
        self.tera
    }
}
