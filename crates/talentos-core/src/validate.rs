//! Request validation layer.
//!
//! Replaces the framework-managed validation of the original API with an
//! explicit one: each field runs an ordered list of rules, every failing
//! rule appends a message, and the aggregate is returned as a single
//! `Validation` error. Messages are the user-facing Portuguese strings
//! of the public API.

use std::collections::BTreeMap;

use crate::error::{TalentosError, TalentosResult};

/// Failing fields mapped to their messages, in rule order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Special characters accepted by the password policy.
const SENHA_ESPECIAIS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Collects validation failures across fields.
///
/// Rule helpers return `true` when the rule passed so callers can chain
/// dependent rules (`required` gating format checks, for instance).
#[derive(Debug, Default)]
pub struct Validador {
    errors: FieldErrors,
}

impl Validador {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, campo: &str, msg: impl Into<String>) {
        self.errors
            .entry(campo.to_string())
            .or_default()
            .push(msg.into());
    }

    /// `required`: the field must be present and non-empty after trim.
    pub fn required(&mut self, campo: &str, valor: Option<&str>) -> bool {
        match valor {
            Some(v) if !v.trim().is_empty() => true,
            _ => {
                self.add(campo, format!("O campo {campo} é obrigatório"));
                false
            }
        }
    }

    /// `max`: at most `max` characters.
    pub fn max_len(&mut self, campo: &str, valor: &str, max: usize) -> bool {
        if valor.chars().count() > max {
            self.add(
                campo,
                format!("O campo {campo} deve ter no máximo {max} caracteres"),
            );
            false
        } else {
            true
        }
    }

    /// Exactly `len` characters (used for the one-char perfil status).
    pub fn exact_len(&mut self, campo: &str, valor: &str, len: usize) -> bool {
        if valor.chars().count() != len {
            self.add(
                campo,
                format!("O campo {campo} deve ter no máximo {len} caracter"),
            );
            false
        } else {
            true
        }
    }

    /// `email`: minimal well-formedness — one `@`, non-empty local part,
    /// a dot in the domain, no whitespace.
    pub fn email(&mut self, campo: &str, valor: &str) -> bool {
        if email_valido(valor) {
            true
        } else {
            self.add(campo, format!("O campo {campo} deve ser um email válido"));
            false
        }
    }

    /// Password complexity policy: ≥ 8 chars, one lowercase, one
    /// uppercase, one digit, one of `@$!%*?&`.
    pub fn senha(&mut self, campo: &str, valor: &str) -> bool {
        let mut ok = true;
        if valor.chars().count() < 8 {
            self.add(
                campo,
                format!("O campo {campo} deve ter no mínimo 8 caracteres"),
            );
            ok = false;
        }
        let tem_minuscula = valor.chars().any(|c| c.is_ascii_lowercase());
        let tem_maiuscula = valor.chars().any(|c| c.is_ascii_uppercase());
        let tem_digito = valor.chars().any(|c| c.is_ascii_digit());
        let tem_especial = valor.chars().any(|c| SENHA_ESPECIAIS.contains(&c));
        if !(tem_minuscula && tem_maiuscula && tem_digito && tem_especial) {
            self.add(
                campo,
                format!(
                    "O campo {campo} deve conter pelo menos uma letra maiúscula, \
                     uma letra minúscula, um número e um caractere especial"
                ),
            );
            ok = false;
        }
        ok
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the validator: `Ok(())` if nothing failed, otherwise the
    /// aggregated `Validation` error.
    pub fn finish(self) -> TalentosResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(TalentosError::Validation {
                errors: self.errors,
            })
        }
    }
}

/// Strip everything that is not an ASCII digit. Idempotent.
pub fn normalizar_cpf(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Same digit-stripping rule as CPF, applied to phone numbers.
pub fn normalizar_celular(raw: &str) -> String {
    normalizar_cpf(raw)
}

/// Trim surrounding whitespace.
pub fn normalizar_email(raw: &str) -> String {
    raw.trim().to_string()
}

fn email_valido(valor: &str) -> bool {
    if valor.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = valor.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(dominio) = parts.next() else {
        return false;
    };
    !local.is_empty()
        && !dominio.is_empty()
        && dominio.contains('.')
        && !dominio.starts_with('.')
        && !dominio.ends_with('.')
        && !dominio.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_normalization_strips_punctuation() {
        assert_eq!(normalizar_cpf("123.456.789-00"), "12345678900");
    }

    #[test]
    fn cpf_normalization_is_idempotent() {
        let once = normalizar_cpf("123.456.789-00");
        assert_eq!(normalizar_cpf(&once), once);
    }

    #[test]
    fn celular_keeps_digits_only() {
        assert_eq!(normalizar_celular("(11) 98765-4321"), "11987654321");
    }

    #[test]
    fn email_is_trimmed() {
        assert_eq!(normalizar_email("  ana@x.com  "), "ana@x.com");
    }

    #[test]
    fn senha_policy_accepts_compliant_password() {
        let mut v = Validador::new();
        assert!(v.senha("senha", "Password1!"));
        assert!(v.finish().is_ok());
    }

    #[test]
    fn senha_policy_rejects_short_password() {
        let mut v = Validador::new();
        // 7 chars, otherwise compliant.
        assert!(!v.senha("senha", "Shor1t!"));
        let err = v.finish().unwrap_err();
        let TalentosError::Validation { errors } = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors["senha"].len(), 1);
        assert!(errors["senha"][0].contains("no mínimo 8"));
    }

    #[test]
    fn senha_policy_rejects_missing_uppercase() {
        let mut v = Validador::new();
        assert!(!v.senha("senha", "alllowercase1!"));
        assert!(v.finish().is_err());
    }

    #[test]
    fn senha_policy_rejects_missing_special() {
        let mut v = Validador::new();
        assert!(!v.senha("senha", "Password12"));
        assert!(v.finish().is_err());
    }

    #[test]
    fn required_gates_follow_up_rules() {
        let mut v = Validador::new();
        assert!(!v.required("nome", None));
        assert!(!v.required("email", Some("   ")));
        assert!(v.required("cpf", Some("12345678900")));
        assert!(v.finish().is_err());
    }

    #[test]
    fn failures_aggregate_across_fields() {
        let mut v = Validador::new();
        v.required("nome", None);
        v.email("email", "not-an-email");
        v.senha("senha", "fraca");
        let TalentosError::Validation { errors } = v.finish().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn email_format_edge_cases() {
        let mut v = Validador::new();
        assert!(v.email("email", "a@b.com"));
        assert!(!v.email("email", "a@b"));
        assert!(!v.email("email", "@b.com"));
        assert!(!v.email("email", "a b@c.com"));
        assert!(!v.email("email", "a@b.com."));
    }

    #[test]
    fn exact_len_for_status_flag() {
        let mut v = Validador::new();
        assert!(v.exact_len("status", "A", 1));
        assert!(!v.exact_len("status", "AB", 1));
    }
}
