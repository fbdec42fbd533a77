//! Multilingual signal patterns
//!
//! The compiled regex sets every feature matches against. Defaults carry the
//! trained model's multilingual literals; hosts shipping updated pattern
//! packs swap them through [`PatternConfig`] without touching the scoring
//! engine.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Source patterns, one per signal family. All are compiled verbatim, so
/// case-insensitivity is part of the pattern (`(?i)`), not implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub password_string: String,
    pub password_attr: String,
    pub new_string: String,
    pub new_attr: String,
    pub confirm_string: String,
    pub confirm_attr: String,
    pub current_attr_and_string: String,
    pub forgot_string: String,
    pub forgot_href: String,
    pub password1: String,
    pub password2: String,
    pub login: String,
    pub login_form_attr: String,
    pub register_string: String,
    pub register_action: String,
    pub register_form_attr: String,
    pub remember_me_attr: String,
    pub remember_me_string: String,
    pub newsletter_string: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            password_string: r"(?i)password|passwort|رمز عبور|mot de passe|パスワード|비밀번호|암호|wachtwoord|senha|Пароль|parol|密码|contraseña|heslo|كلمة السر|kodeord|Κωδικός|pass code|Kata sandi|hasło|รหัสผ่าน|Şifre".to_string(),
            password_attr: r"(?i)pw|pwd|passwd|pass".to_string(),
            new_string: r"(?i)new|erstellen|create|choose|設定|신규|Créer|Nouveau|baru|nouă|nieuw".to_string(),
            new_attr: r"(?i)new".to_string(),
            confirm_string: r"(?i)wiederholen|wiederholung|confirm|repeat|confirmation|verify|retype|repite|確認|の確認|تکرار|re-enter|확인|bevestigen|confirme|Повторите|tassyklamak|再次输入|ještě jednou|gentag|re-type|confirmar|Répéter|conferma|Repetaţi|again|reenter|再入力|재입력|Ulangi|Bekræft".to_string(),
            confirm_attr: r"(?i)confirm|retype".to_string(),
            current_attr_and_string: r"(?i)current|old|aktuelles|derzeitiges|当前|Atual|actuel|curentă|sekarang".to_string(),
            forgot_string: r"(?i)vergessen|vergeten|forgot|oublié|dimenticata|Esqueceu|esqueci|Забыли|忘记|找回|Zapomenuté|lost|忘れた|忘れられた|忘れの方|재설정|찾기|help|فراموشی| را فراموش کرده اید|Восстановить|Unuttu|perdus|重新設定|reset|recover|change|remind|find|request|restore|trouble".to_string(),
            forgot_href: r"(?i)forgot|reset|recover|change|lost|remind|find|request|restore".to_string(),
            password1: r"(?i)pw1|pwd1|pass1|passwd1|password1|pwone|pwdone|passone|passwdone|passwordone|pwfirst|pwdfirst|passfirst|passwdfirst|passwordfirst".to_string(),
            password2: r"(?i)pw2|pwd2|pass2|passwd2|password2|pwtwo|pwdtwo|passtwo|passwdtwo|passwordtwo|pwsecond|pwdsecond|passsecond|passwdsecond|passwordsecond".to_string(),
            login: r"(?i)login|log in|log on|log-on|Войти|sign in|sigin|sign/in|sign-in|sign on|sign-on|ورود|登录|Přihlásit se|Přihlaste|Авторизоваться|Авторизация|entrar|ログイン|로그인|inloggen|Συνδέσου|accedi|ログオン|Giriş Yap|登入|connecter|connectez-vous|Connexion|Вход".to_string(),
            login_form_attr: r"(?i)login|log in|log on|log-on|sign in|sigin|sign/in|sign-in|sign on|sign-on".to_string(),
            register_string: r"(?i)create[a-zA-Z\s]+account|activate[a-zA-Z\s]+account|Zugang anlegen|Angaben prüfen|Konto erstellen|register|sign up|ثبت نام|登録|注册|cadastr|Зарегистрироваться|Регистрация|Bellige alynmak|تسجيل|ΕΓΓΡΑΦΗΣ|Εγγραφή|Créer mon compte|Créer un compte|Mendaftar|가입하기|inschrijving|Zarejestruj się|Deschideți un cont|Создать аккаунт|ร่วม|Üye Ol|registr|new account|ساخت حساب کاربری|Schrijf je|S'inscrire".to_string(),
            register_action: r"(?i)register|signup|sign-up|create-account|account/create|join|new_account|user/create|sign/up|membership/create".to_string(),
            register_form_attr: r"(?i)signup|join|register|regform|registration|new_user|AccountCreate|create_customer|CreateAccount|CreateAcct|create-account|reg-form|newuser|new-reg|new-form|new_membership".to_string(),
            remember_me_attr: r"(?i)remember|auto_login|auto-login|save_mail|save-mail|ricordami|manter|mantenha|savelogin|auto login".to_string(),
            remember_me_string: r"(?i)remember me|keep me logged in|keep me signed in|save email address|save id|stay signed in|ricordami|次回からログオンIDの入力を省略する|メールアドレスを保存する|を保存|아이디저장|아이디 저장|로그인 상태 유지|lembrar|manter conectado|mantenha-me conectado|Запомни меня|запомнить меня|Запомните меня|Не спрашивать в следующий раз|下次自动登录|记住我".to_string(),
            newsletter_string: r"(?i)newsletter|ニュースレター".to_string(),
        }
    }
}

/// Compiled pattern set handed to every feature evaluation
#[derive(Debug, Clone)]
pub struct Patterns {
    pub password_string: Regex,
    pub password_attr: Regex,
    pub new_string: Regex,
    pub new_attr: Regex,
    pub confirm_string: Regex,
    pub confirm_attr: Regex,
    pub current_attr_and_string: Regex,
    pub forgot_string: Regex,
    pub forgot_href: Regex,
    pub password1: Regex,
    pub password2: Regex,
    pub login: Regex,
    pub login_form_attr: Regex,
    pub register_string: Regex,
    pub register_action: Regex,
    pub register_form_attr: Regex,
    pub remember_me_attr: Regex,
    pub remember_me_string: Regex,
    pub newsletter_string: Regex,
    /// Union of password_string and password_attr, used by href checks
    pub password_string_or_attr: Regex,
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, ModelError> {
    Regex::new(pattern).map_err(|source| ModelError::InvalidPattern { name, source })
}

impl Patterns {
    pub fn compile_from(config: &PatternConfig) -> Result<Self, ModelError> {
        Ok(Self {
            password_string: compile("password_string", &config.password_string)?,
            password_attr: compile("password_attr", &config.password_attr)?,
            new_string: compile("new_string", &config.new_string)?,
            new_attr: compile("new_attr", &config.new_attr)?,
            confirm_string: compile("confirm_string", &config.confirm_string)?,
            confirm_attr: compile("confirm_attr", &config.confirm_attr)?,
            current_attr_and_string: compile(
                "current_attr_and_string",
                &config.current_attr_and_string,
            )?,
            forgot_string: compile("forgot_string", &config.forgot_string)?,
            forgot_href: compile("forgot_href", &config.forgot_href)?,
            password1: compile("password1", &config.password1)?,
            password2: compile("password2", &config.password2)?,
            login: compile("login", &config.login)?,
            login_form_attr: compile("login_form_attr", &config.login_form_attr)?,
            register_string: compile("register_string", &config.register_string)?,
            register_action: compile("register_action", &config.register_action)?,
            register_form_attr: compile("register_form_attr", &config.register_form_attr)?,
            remember_me_attr: compile("remember_me_attr", &config.remember_me_attr)?,
            remember_me_string: compile("remember_me_string", &config.remember_me_string)?,
            newsletter_string: compile("newsletter_string", &config.newsletter_string)?,
            password_string_or_attr: compile(
                "password_string_or_attr",
                &format!("{}|{}", config.password_string, config.password_attr),
            )?,
        })
    }

    /// The built-in pattern set, compiled once
    pub fn builtin() -> &'static Patterns {
        static BUILTIN: Lazy<Patterns> = Lazy::new(|| {
            Patterns::compile_from(&PatternConfig::default())
                .expect("built-in patterns compile")
        });
        &BUILTIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_patterns_compile() {
        let p = Patterns::builtin();
        assert!(p.password_string.is_match("Password"));
        assert!(p.password_string.is_match("contraseña"));
        assert!(p.confirm_string.is_match("Re-enter your password"));
        assert!(p.new_string.is_match("Choose a password"));
        assert!(p.current_attr_and_string.is_match("old-password"));
        assert!(p.register_string.is_match("Create your account"));
        assert!(!p.login.is_match("checkout"));
    }

    #[test]
    fn test_href_union_matches_attr_shorthand() {
        let p = Patterns::builtin();
        assert!(p.password_string_or_attr.is_match("/account/pwd/reset"));
        assert!(!p.password_string.is_match("/account/pwd/reset"));
    }

    #[test]
    fn test_invalid_pattern_is_reported_by_name() {
        let mut config = PatternConfig::default();
        config.new_attr = "(".to_string();
        let err = Patterns::compile_from(&config).unwrap_err();
        match err {
            ModelError::InvalidPattern { name, .. } => assert_eq!(name, "new_attr"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
