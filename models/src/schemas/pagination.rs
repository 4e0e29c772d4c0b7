use serde::Serialize;

#[derive(Serialize)]
pub struct ListSchema<T> {
    pub data: Vec<T>,
}

impl<U, T: From<U>> From<Vec<U>> for ListSchema<T> {
    fn from(data: Vec<U>) -> Self {
        Self {
            data: data.into_iter().map(T::from).collect(),
        }
    }
}
