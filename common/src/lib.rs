use validator::ValidationErrors;

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::format_validation_errors;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(email(message = "Invalid email address"))]
        email: String,
    }

    #[test]
    fn joins_field_messages() {
        let probe = Probe {
            email: "not-an-email".into(),
        };
        let errors = probe.validate().unwrap_err();
        assert_eq!(format_validation_errors(&errors), "Invalid email address");
    }
}
