use anyhow::Result;

/// A read-only question asked of some service, paired with its answer type.
pub trait Request {
    type Resp;
}

/// Services that can answer requests of type `Req`, such as the catalog
/// listings behind the CLI.
pub trait Queryable<Req>
where
    Req: Request,
{
    fn query(&self, req: Req) -> Result<Req::Resp>;
}
