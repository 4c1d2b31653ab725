//! Conversion of parameter values to their wire text

use url::form_urlencoded;

/// A value that can be sent as a path or query parameter
///
/// Sequences are comma-joined, which is how the api takes id lists.
pub trait ToParam {
    fn to_param(&self) -> String;
}

macro_rules! impl_display_param {
    ($($ty:ty),*) => {
        $(
            impl ToParam for $ty {
                fn to_param(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_display_param!(bool, i32, i64, f32, f64, str, String);

impl<T: ToParam> ToParam for [T] {
    fn to_param(&self) -> String {
        self.iter()
            .map(ToParam::to_param)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T: ToParam> ToParam for Vec<T> {
    fn to_param(&self) -> String {
        self.as_slice().to_param()
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

/// Encode query pairs as `application/x-www-form-urlencoded`, in the given order
///
/// # Examples
/// ```
/// use lolgen_runtime::encode_query;
///
/// let query = encode_query([("champData", "image,info"), ("api_key", "k")]);
/// assert_eq!(query, "champData=image%2Cinfo&api_key=k");
/// ```
pub fn encode_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(true.to_param(), "true");
        assert_eq!(42i32.to_param(), "42");
        assert_eq!(585897i64.to_param(), "585897");
        assert_eq!("RiotSchmick".to_param(), "RiotSchmick");
        assert_eq!(String::from("en_US").to_param(), "en_US");
    }

    #[test]
    fn test_sequences_are_comma_joined() {
        assert_eq!(vec![1i64, 2, 3].to_param(), "1,2,3");
        assert_eq!(["a", "b"][..].to_param(), "a,b");
        let empty: Vec<i64> = Vec::new();
        assert_eq!(empty.to_param(), "");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query(Vec::<(&str, &str)>::new()), "");
        assert_eq!(
            encode_query([("locale", "ko_KR"), ("tags", "a b")]),
            "locale=ko_KR&tags=a+b"
        );
    }
}
