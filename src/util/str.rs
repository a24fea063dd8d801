pub(crate) trait StringExt {
    fn trim_in_place(&mut self);
}

impl StringExt for String {
    fn trim_in_place(&mut self) {
        self.truncate(self.trim_end().len());

        let start = self.len() - self.trim_start().len();
        if start > 0 {
            self.drain(..start);
        }
    }
}

pub(crate) fn prefix(prefix: &str, main: &str) -> String {
    let mut string = String::with_capacity(prefix.len() + main.len());
    string.push_str(prefix);
    string.push_str(main);
    string
}

#[cfg(test)]
mod tests {
    use super::StringExt;

    #[test]
    fn test_trim_in_place() {
        let mut value = String::from("  Home Page \n");
        value.trim_in_place();
        assert_eq!("Home Page", value);
    }
}
