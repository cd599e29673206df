use std::fmt;

pub trait TextEncoding: Sized {
    type Error;

    fn encode(&self, writer: &mut impl fmt::Write) -> fmt::Result;
    fn decode(text: &str) -> Result<Self, Self::Error>;

    fn encode_string(&self) -> String {
        let mut result = String::new();
        self.encode(&mut result).unwrap(/* Write for String should never fail */);
        result
    }
}
