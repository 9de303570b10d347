use crate::utils::{GENERATED_CODE_LEN, generate_random_code};

pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform draw of [`GENERATED_CODE_LEN`] characters from the 62-character
/// alphanumeric alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_random_code(GENERATED_CODE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_valid_short_code;

    #[test]
    fn test_generated_codes_are_valid_shortcodes() {
        let generator = RandomCodeGenerator;
        for _ in 0..100 {
            let code = generator.generate();
            assert_eq!(code.len(), 8);
            assert!(is_valid_short_code(&code), "{code}");
        }
    }
}
