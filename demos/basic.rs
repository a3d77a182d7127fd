use json_model::{def, value, Kind::*, Model, Union};

fn main() -> json_model::Result<()> {
    // A directory listing: every entry has a name and either a size (file)
    // or its own list of entries (directory).
    let entry = Model::new(def!({
        "name": Str,
        "size": {"type": Num, "required": false},
        "readonly": Bool,
        "owner": (Union::new().alt(Str).alt(Num)),
    }))?;
    let listing = Model::new(def!({
        "path": Str,
        "entries": [entry.clone()],
    }))?;

    let good = value!({
        "path": "/srv/media",
        "entries": [
            {"name": "index.db", "size": 4096, "readonly": false, "owner": "admin"},
            {"name": "archive.tar", "size": 1048576, "readonly": true, "owner": 0},
        ],
    });
    let bad = value!({
        "path": "/srv/media",
        "entries": [
            {"name": "index.db", "readonly": false, "owner": "admin", "hidden": true},
        ],
    });

    println!("good listing matches: {}", listing.confirm_matches(&good));
    println!("bad listing matches:  {}", listing.confirm_matches(&bad));
    Ok(())
}
