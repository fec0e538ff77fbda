use tera::{Context, Tera};

const EMAIL_HTML: &str = include_str!("../../templates/email_html.tera");
const EMAIL_TEXT: &str = include_str!("../../templates/email_text.tera");
const WHATSAPP_TEXT: &str = include_str!("../../templates/whatsapp.tera");

pub const EMAIL_SUBJECT: &str = "🎉 Obrigado por participar da pesquisa Linkize!";

fn templates() -> Result<Tera, String> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("email.html", EMAIL_HTML),
        ("email.txt", EMAIL_TEXT),
        ("whatsapp.txt", WHATSAPP_TEXT),
    ])
    .map_err(|e| format!("Template load failed: {e}"))?;
    Ok(tera)
}

fn render(template: &str, name: &str) -> Result<String, String> {
    let tera = templates()?;
    let mut ctx = Context::new();
    ctx.insert("name", name);
    tera.render(template, &ctx)
        .map_err(|e| format!("Render failed for {template}: {e}"))
}

/// Thank-you email bodies, HTML and plain text.
pub fn render_email(name: &str) -> Result<(String, String), String> {
    Ok((render("email.html", name)?, render("email.txt", name)?))
}

/// Thank-you WhatsApp message body.
pub fn render_whatsapp(name: &str) -> Result<String, String> {
    render("whatsapp.txt", name)
}
