/// Maps Turkish-specific letters to their closest ASCII base letter.
///
/// The mapping covers both cases of the dotted/dotless i pair, s and c with
/// cedilla, g with breve and the umlauted o and u:
///
/// ```text
/// ğ Ğ ı İ ö Ö ü Ü ş Ş ç Ç
/// g G i I o O u U s S c C
/// ```
///
/// Every other character passes through unchanged, so folding is total and
/// idempotent.
///
/// # Examples
///
/// ```
/// use temiz_core::analyzer::TurkishFolder;
///
/// let folder = TurkishFolder::new();
/// assert_eq!(folder.fold("Ağır şüphe, İÇİN"), "Agir suphe, ICIN");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TurkishFolder;

impl TurkishFolder {
    /// Creates a folder.
    pub const fn new() -> Self {
        Self
    }

    /// Folds `input` into an existing buffer.
    ///
    /// Clears the buffer first and reuses its capacity. The leading ASCII run
    /// is copied in one go; only the remainder is walked char by char.
    #[inline]
    pub fn fold_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let split = input
            .bytes()
            .position(|b| b >= 0x80)
            .unwrap_or(input.len());
        let (ascii, rest) = input.split_at(split);
        out.push_str(ascii);

        out.extend(rest.chars().map(fold_char));
    }

    /// Folds `input` and returns a new String.
    #[inline]
    pub fn fold(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.fold_into(input, &mut out);
        out
    }
}

#[inline(always)]
fn fold_char(c: char) -> char {
    match c {
        'ğ' => 'g',
        'Ğ' => 'G',
        'ı' => 'i',
        'İ' => 'I',
        'ö' => 'o',
        'Ö' => 'O',
        'ü' => 'u',
        'Ü' => 'U',
        'ş' => 's',
        'Ş' => 'S',
        'ç' => 'c',
        'Ç' => 'C',
        _ => c,
    }
}
