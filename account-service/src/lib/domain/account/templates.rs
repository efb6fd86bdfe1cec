//! HTML bodies for account emails.

pub fn email_verification(confirmation_url: &str, code: &str) -> String {
    format!(
        "<html><body>\
         <h2>Confirm your account</h2>\
         <p>Thanks for signing up. Confirm your email address by opening the link below.</p>\
         <p><a href=\"{url}\">{url}</a></p>\
         <p>Your confirmation code is <strong>{code}</strong>.</p>\
         </body></html>",
        url = confirmation_url,
        code = code,
    )
}

pub fn verification_successful() -> String {
    "<html><body>\
     <h2>Welcome aboard</h2>\
     <p>Your account has been verified. You can now sign in.</p>\
     </body></html>"
        .to_string()
}

pub fn forgot_password(reset_link: &str) -> String {
    format!(
        "<html><body>\
         <h2>Password reset request</h2>\
         <p>Open the link below to choose a new password. It expires shortly.</p>\
         <p><a href=\"{link}\">{link}</a></p>\
         <p>If you did not request this, ignore this email.</p>\
         </body></html>",
        link = reset_link,
    )
}

pub fn password_reset_successful() -> String {
    "<html><body>\
     <h2>Password changed</h2>\
     <p>Your password was reset. All existing sessions have been signed out.</p>\
     </body></html>"
        .to_string()
}
