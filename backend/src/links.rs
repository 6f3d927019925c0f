//! Magic-link delivery.
//!
//! Links are handed to a `LinkSender`. The server ships with `LogLinkSender`,
//! which writes them to the log; a mail transport plugs in behind the same
//! trait.

use log::info;

pub trait LinkSender: Send + Sync {
    fn send_login_link(&self, email: &str, link: &str);
    fn send_sign_up_link(&self, email: &str, link: &str);
}

pub struct LogLinkSender;

impl LinkSender for LogLinkSender {
    fn send_login_link(&self, email: &str, link: &str) {
        info!("Votre lien de connexion avec ma cantine ({email}): {link}");
    }

    fn send_sign_up_link(&self, email: &str, link: &str) {
        info!("Inscription à ma cantine ({email}): {link}");
    }
}

pub fn login_link(public_url: &str, token: &str) -> String {
    format!("{public_url}/?token={token}")
}

pub fn sign_up_link(public_url: &str) -> String {
    format!("{public_url}/inscription")
}
