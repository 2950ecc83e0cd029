pub fn step_cursor(cursor: usize, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as i128;
    let next = (cursor as i128 + delta as i128).rem_euclid(len);
    Some(next as usize)
}
