//! Bundled language packs.
//!
//! English is the canonical fallback; Persian ships alongside it.

use crate::i18n::pack::{Bucket, LanguagePack};

// ==================== English ====================

/// English language pack (canonical fallback)
pub fn english() -> LanguagePack {
    LanguagePack::new("success", "failed")
        // Success messages
        .with_message(Bucket::Success, "insert", "The requested parameter is added successfully!")
        .with_message(Bucket::Success, "update", "The requested parameter is updated successfully!")
        .with_message(Bucket::Success, "delete", "The requested parameter is deleted successfully!")
        // Failure messages
        .with_message(Bucket::Failed, "insert", "The requested parameter is not added!")
        .with_message(Bucket::Failed, "update", "The requested parameter is not updated!")
        .with_message(Bucket::Failed, "delete", "The requested parameter is not deleted!")
        // Errors
        .with_error(1001, "Oops... Requested field is not found!")
        .with_error(1004, "Failed because of duplicate")
        .with_error(5401, "Oops... You are not authorized to do this!")
        .with_error(5404, "Oops... The requested page not found!")
        .with_error(5405, "Oops... The method you requested is not allowed!")
        .with_error(5406, "Oops... The parameters you entered are wrong!")
        .with_error(5420, "Oops... Some of the fields you entered are not valid!")
}

// ==================== Persian ====================

/// Persian language pack
pub fn persian() -> LanguagePack {
    LanguagePack::new("موفق", "ناموفق")
        // Success messages
        .with_message(Bucket::Success, "insert", "پارامتر درخواستی با موفقیت اضافه شد!")
        .with_message(Bucket::Success, "update", "پارامتر درخواستی با موفقیت ویرایش شد!")
        .with_message(Bucket::Success, "delete", "پارامتر درخواستی با موفقیت حذف شد!")
        // Failure messages
        .with_message(Bucket::Failed, "insert", "پارامتر درخواستی اضافه نشد!")
        .with_message(Bucket::Failed, "update", "پارامتر درخواستی ویرایش نشد!")
        .with_message(Bucket::Failed, "delete", "پارامتر درخواستی حذف نشد!")
        // Errors
        .with_error(1001, "اوه... فیلد درخواستی پیدا نشد!")
        .with_error(1004, "به دلیل تکراری بودن انجام نشد")
        .with_error(5401, "اوه... شما اجازه انجام این کار را ندارید!")
        .with_error(5404, "اوه... صفحه درخواستی پیدا نشد!")
        .with_error(5405, "اوه... متد درخواستی مجاز نیست!")
        .with_error(5406, "اوه... پارامترهای وارد شده اشتباه هستند!")
        .with_error(5420, "اوه... برخی از فیلدهای وارد شده معتبر نیستند!")
}

/// All bundled packs, keyed by language code.
pub fn bundled() -> Vec<(&'static str, LanguagePack)> {
    vec![("en", english()), ("fa", persian())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_packs_are_valid() {
        for (code, pack) in bundled() {
            assert!(pack.validate().is_ok(), "pack '{}' should be valid", code);
        }
    }

    #[test]
    fn test_bundled_packs_are_complete() {
        for (code, pack) in bundled() {
            let missing = pack.missing_required();
            assert!(missing.is_empty(), "pack '{}' is missing {:?}", code, missing);
        }
    }

    #[test]
    fn test_bundled_packs_define_same_error_codes() {
        let english_codes: Vec<_> = english().errors.keys().copied().collect();
        let persian_codes: Vec<_> = persian().errors.keys().copied().collect();
        assert_eq!(english_codes, persian_codes);
    }

    #[test]
    fn test_english_status_texts() {
        let pack = english();
        assert_eq!(pack.success, "success");
        assert_eq!(pack.failed, "failed");
    }

    #[test]
    fn test_english_not_found_message() {
        assert_eq!(
            english().error_entry(5404).unwrap().message,
            "Oops... The requested page not found!"
        );
    }
}
