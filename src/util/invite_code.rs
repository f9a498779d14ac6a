use rand::{thread_rng, Rng};

pub const INVITE_CODE_LENGTH: usize = 8;

pub fn generate_invite_code() -> String {
    generate_random_string(INVITE_CODE_LENGTH)
}

pub fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let charset_length = CHARSET.len();

    let mut rng = thread_rng();
    (0..length)
        .map(|_| {
            let random_index = rng.gen_range(0..charset_length);
            CHARSET[random_index] as char
        })
        .collect()
}
