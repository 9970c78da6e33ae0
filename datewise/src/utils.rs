//! Small formatting helpers

/// Pad a number to at least two digits.
///
/// Negative single digits keep their sign in front: `-9` becomes `-09`.
pub fn zero_fill(num: i64) -> String {
    if num < 0 {
        if num > -10 {
            format!("-0{}", -num)
        } else {
            num.to_string()
        }
    } else {
        format!("{:02}", num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(zero_fill(0), "00");
        assert_eq!(zero_fill(1), "01");
        assert_eq!(zero_fill(10), "10");
        assert_eq!(zero_fill(2022), "2022");
    }

    #[test]
    fn test_negative() {
        assert_eq!(zero_fill(-9), "-09");
        assert_eq!(zero_fill(-10), "-10");
        assert_eq!(zero_fill(i64::MIN), i64::MIN.to_string());
    }
}
