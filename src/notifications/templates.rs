// HTML bodies for the verification and welcome emails

pub const VERIFICATION_SUBJECT: &str = "Verify Your Nomado Account";
pub const WELCOME_SUBJECT: &str = "Welcome to Nomado - Let's Start Your Journey!";

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; margin: 0; padding: 0; background-color: #f4f4f4; }
    .container { max-width: 600px; margin: 0 auto; background: white; padding: 20px; border-radius: 10px; }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; border-radius: 10px 10px 0 0; }
    .content { padding: 30px; }
    .verification-code { background: #f8f9ff; border: 2px dashed #667eea; padding: 20px; margin: 20px 0; text-align: center; border-radius: 8px; }
    .code { font-size: 32px; font-weight: bold; color: #667eea; letter-spacing: 4px; }
    .button { display: inline-block; background: #667eea; color: white; padding: 12px 30px; text-decoration: none; border-radius: 25px; margin: 20px 0; }
    .footer { text-align: center; color: #666; font-size: 12px; margin-top: 30px; }
"#;

/// Link the frontend uses to complete verification
pub fn verification_link(frontend_url: &str, email: &str, code: &str) -> String {
    format!(
        "{}/verify-email?email={}&code={}",
        frontend_url.trim_end_matches('/'),
        urlencoding::encode(email),
        urlencoding::encode(code)
    )
}

pub fn verification_email(frontend_url: &str, email: &str, first_name: &str, code: &str) -> String {
    let name = html_escape::encode_text(first_name);
    let link = html_escape::encode_double_quoted_attribute(&verification_link(frontend_url, email, code)).into_owned();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Verify Your Email</title><style>{style}</style></head>
<body>
  <div class="container">
    <div class="header"><h1>Welcome to Nomado!</h1><p>Your Gateway to Africa &amp; Beyond</p></div>
    <div class="content">
      <h2>Hello {name}!</h2>
      <p>Thank you for joining Nomado! Please verify your email address to complete your registration.</p>
      <div class="verification-code">
        <p><strong>Your Verification Code:</strong></p>
        <div class="code">{code}</div>
      </div>
      <p>Enter this code on the verification page, or click the button below:</p>
      <div style="text-align: center;"><a href="{link}" class="button">Verify My Email</a></div>
    </div>
    <div class="footer"><p>If you didn't create this account, please ignore this email.</p></div>
  </div>
</body>
</html>"#,
        style = STYLE,
        name = name,
        code = html_escape::encode_text(code),
        link = link,
    )
}

pub fn welcome_email(frontend_url: &str, first_name: &str) -> String {
    let name = html_escape::encode_text(first_name);
    let base = frontend_url.trim_end_matches('/');

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Welcome to Nomado</title><style>{style}</style></head>
<body>
  <div class="container">
    <div class="header"><h1>Welcome to Nomado, {name}!</h1><p>Your verified account is ready to go!</p></div>
    <div class="content">
      <h2>You're All Set!</h2>
      <p>Your email has been verified and your Nomado account is now active.</p>
      <div style="text-align: center;">
        <a href="{base}/dashboard" class="button">Start Exploring</a>
        <a href="{base}/services" class="button">View Services</a>
      </div>
    </div>
    <div class="footer"><p>Follow us on social media for travel tips and deals!</p></div>
  </div>
</body>
</html>"#,
        style = STYLE,
        name = name,
        base = html_escape::encode_double_quoted_attribute(base),
    )
}
