use crate::rules::types::{Category, RuleSpec};

/// SSE/AVX intrinsic headers and the `_mm*` call families.
pub(super) fn spec() -> RuleSpec {
    RuleSpec::new(
        Category::ArchitectureIntrinsic,
        [
            r"#include\s*<.*mmintrin\.h.*>",
            r"#include\s*<.*xmmintrin\.h.*>",
            r"#include\s*<.*emmintrin\.h.*>",
            r"#include\s*<.*pmmintrin\.h.*>",
            r"#include\s*<.*immintrin\.h.*>",
            r"_mm_\w+",
            r"_mm\d+_\w+",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_detects_intrinsic_headers_and_calls() {
        let spec = spec();
        let test_cases = vec![
            ("#include <xmmintrin.h>", true),
            ("#include <immintrin.h>  // AVX", true),
            ("__m128 vr = _mm_add_ps(va, vb);", true),
            ("__m256d x = _mm256_setzero_pd();", true),
            ("#include <arm_neon.h>", false),
            ("float comm_rate = 0.1;", false),
        ];

        for (input, should_match) in test_cases {
            let matched = spec
                .patterns
                .iter()
                .any(|p| Regex::new(p).unwrap().is_match(input));
            assert_eq!(matched, should_match, "Failed for input: {}", input);
        }
    }

    #[test]
    fn test_header_expression_ordered_before_call_expression() {
        // An include line also contains `mmintrin`; the header expression
        // must be registered first so it is the one reported.
        let spec = spec();
        let first_matching = spec
            .patterns
            .iter()
            .find(|p| Regex::new(p).unwrap().is_match("#include <xmmintrin.h>"))
            .unwrap();
        assert!(first_matching.contains("include"));
    }
}
